use querygraph::metadata::{
    shared, PathError, SchemaGraph, SemanticType, StaticSchemaProvider,
};

/// Music-catalog schema: tracks ←(track_id)— track_artists —(artist_id)→ artists.
fn music_provider() -> StaticSchemaProvider {
    StaticSchemaProvider::new("music")
        .with_column("tracks", "id", "int")
        .with_column("tracks", "name", "varchar(255)")
        .with_column("track_artists", "track_id", "int")
        .with_column("track_artists", "artist_id", "int")
        .with_column("artists", "id", "int")
        .with_column("artists", "name", "varchar(255)")
        .with_foreign_key("track_artists", "track_id", "tracks", "id")
        .with_foreign_key("track_artists", "artist_id", "artists", "id")
}

#[tokio::test]
async fn test_build_populates_catalog_and_edges() {
    let provider = music_provider();
    let graph = SchemaGraph::build(&provider, "music").await.unwrap();

    assert_eq!(graph.table_count(), 3);
    // Two FKs, each inserted bidirectionally
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.type_of("tracks", "name"), Some(&SemanticType::Str));
    assert_eq!(
        graph.type_of("track_artists", "artist_id"),
        Some(&SemanticType::Int)
    );
}

#[tokio::test]
async fn test_build_unknown_schema_fails() {
    let provider = music_provider();
    let result = SchemaGraph::build(&provider, "wrong").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_build_without_foreign_keys_yields_isolated_nodes() {
    let provider = StaticSchemaProvider::new("flat")
        .with_column("a", "id", "int")
        .with_column("b", "id", "int");
    let graph = SchemaGraph::build(&provider, "flat").await.unwrap();

    assert_eq!(graph.table_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.edges_from("a").is_empty());
}

#[tokio::test]
async fn test_edges_are_navigable_both_ways() {
    let provider = music_provider();
    let graph = SchemaGraph::build(&provider, "music").await.unwrap();

    let out = graph.edges_from("track_artists");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].condition(), "track_artists.track_id=tracks.id");
    assert_eq!(out[1].condition(), "track_artists.artist_id=artists.id");

    let back = graph.edges_from("tracks");
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].condition(), "tracks.id=track_artists.track_id");
}

#[tokio::test]
async fn test_edge_between() {
    let provider = music_provider();
    let graph = SchemaGraph::build(&provider, "music").await.unwrap();

    let edge = graph.edge_between("tracks", "track_artists").unwrap();
    assert_eq!(edge.condition(), "tracks.id=track_artists.track_id");

    let err = graph.edge_between("tracks", "artists").unwrap_err();
    assert!(matches!(err, PathError::NoDirectEdge { .. }));
}

#[tokio::test]
async fn test_register_table_adds_columns_but_no_edges() {
    let provider = music_provider();
    let mut graph = SchemaGraph::build(&provider, "music").await.unwrap();

    let derived = StaticSchemaProvider::new("music")
        .with_column("u_mee_favorites", "track_id", "int")
        .with_column("u_mee_favorites", "note", "text");
    graph
        .register_table(&derived, "music", "u_mee_favorites")
        .await
        .unwrap();

    assert!(graph.contains_table("u_mee_favorites"));
    assert_eq!(
        graph.type_of("u_mee_favorites", "note"),
        Some(&SemanticType::Str)
    );
    // Derived tables are leaves: no edges, so no join path to them
    assert!(graph.edges_from("u_mee_favorites").is_empty());
    assert!(graph.join_path("tracks", "u_mee_favorites").is_err());
}

#[tokio::test]
async fn test_shared_graph_read_after_write() {
    let provider = music_provider();
    let mut built = SchemaGraph::build(&provider, "music").await.unwrap();

    // Registration happens before sharing; callers extending a shared
    // graph introspect first and take the write lock only to mutate.
    let derived = StaticSchemaProvider::new("music").with_column("u_mee_notes", "id", "int");
    built.register_table(&derived, "music", "u_mee_notes").await.unwrap();

    let graph = shared(built);
    let reader = graph.read().unwrap();
    assert!(reader.contains_table("u_mee_notes"));
    assert_eq!(reader.table_count(), 4);
}
