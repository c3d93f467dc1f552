use querygraph::metadata::{PathError, SchemaGraph, StaticSchemaProvider};

/// Chain schema: tracks — track_artists — artists, plus an unrelated
/// isolated table.
fn chain_provider() -> StaticSchemaProvider {
    StaticSchemaProvider::new("music")
        .with_column("tracks", "id", "int")
        .with_column("track_artists", "track_id", "int")
        .with_column("track_artists", "artist_id", "int")
        .with_column("artists", "id", "int")
        .with_column("settings", "key", "varchar(64)")
        .with_foreign_key("track_artists", "track_id", "tracks", "id")
        .with_foreign_key("track_artists", "artist_id", "artists", "id")
}

/// Diamond schema: a—b—d and a—c—d, b discovered first.
fn diamond_provider() -> StaticSchemaProvider {
    StaticSchemaProvider::new("diamond")
        .with_column("a", "id", "int")
        .with_column("b", "id", "int")
        .with_column("c", "id", "int")
        .with_column("d", "id", "int")
        .with_foreign_key("b", "a_id", "a", "id")
        .with_foreign_key("c", "a_id", "a", "id")
        .with_foreign_key("d", "b_id", "b", "id")
        .with_foreign_key("d", "c_id", "c", "id")
}

#[tokio::test]
async fn test_same_table_yields_empty_fragment() {
    let graph = SchemaGraph::build(&chain_provider(), "music").await.unwrap();
    let path = graph.join_path("tracks", "tracks").unwrap();
    assert!(path.is_empty());
    assert_eq!(path.to_join_fragment(), "");
}

#[tokio::test]
async fn test_direct_neighbor_is_one_join() {
    let graph = SchemaGraph::build(&chain_provider(), "music").await.unwrap();
    let path = graph.join_path("tracks", "track_artists").unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(
        path.to_join_fragment(),
        "JOIN track_artists ON tracks.id=track_artists.track_id"
    );
}

#[tokio::test]
async fn test_two_hop_path_is_minimal() {
    let graph = SchemaGraph::build(&chain_provider(), "music").await.unwrap();
    let path = graph.join_path("tracks", "artists").unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(
        path.to_join_fragment(),
        "JOIN track_artists ON tracks.id=track_artists.track_id \
         JOIN artists ON track_artists.artist_id=artists.id"
    );
}

#[tokio::test]
async fn test_path_is_walkable_in_reverse_direction() {
    let graph = SchemaGraph::build(&chain_provider(), "music").await.unwrap();
    let path = graph.join_path("artists", "tracks").unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(
        path.to_join_fragment(),
        "JOIN track_artists ON artists.id=track_artists.artist_id \
         JOIN tracks ON track_artists.track_id=tracks.id"
    );
}

#[tokio::test]
async fn test_unreachable_destination_fails_without_partial_text() {
    let graph = SchemaGraph::build(&chain_provider(), "music").await.unwrap();
    let err = graph.join_path("tracks", "settings").unwrap_err();
    match err {
        PathError::NoPathFound { from, to } => {
            assert_eq!(from, "tracks");
            assert_eq!(to, "settings");
        }
        other => panic!("expected NoPathFound, got {other}"),
    }
}

#[tokio::test]
async fn test_unknown_table_is_no_path() {
    let graph = SchemaGraph::build(&chain_provider(), "music").await.unwrap();
    assert!(matches!(
        graph.join_path("tracks", "nope"),
        Err(PathError::NoPathFound { .. })
    ));
    assert!(matches!(
        graph.join_path("nope", "tracks"),
        Err(PathError::NoPathFound { .. })
    ));
}

#[tokio::test]
async fn test_equal_length_paths_tie_break_on_insertion_order() {
    let graph = SchemaGraph::build(&diamond_provider(), "diamond")
        .await
        .unwrap();
    let path = graph.join_path("a", "d").unwrap();
    assert_eq!(path.len(), 2);
    // b's foreign key was introspected before c's, so the b route wins
    assert_eq!(
        path.to_join_fragment(),
        "JOIN b ON a.id=b.a_id JOIN d ON b.id=d.b_id"
    );
}

#[tokio::test]
async fn test_direct_edge_beats_longer_route() {
    let provider = StaticSchemaProvider::new("shortcut")
        .with_column("a", "id", "int")
        .with_column("b", "id", "int")
        .with_column("c", "id", "int")
        .with_foreign_key("b", "a_id", "a", "id")
        .with_foreign_key("c", "b_id", "b", "id")
        .with_foreign_key("c", "a_id", "a", "id");
    let graph = SchemaGraph::build(&provider, "shortcut").await.unwrap();

    let path = graph.join_path("a", "c").unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path.to_join_fragment(), "JOIN c ON a.id=c.a_id");
}
