//! End-to-end: introspect a synthetic schema, compile JSON requests,
//! and check the emitted text both exactly and for MySQL validity.

use querygraph::metadata::{SchemaGraph, StaticSchemaProvider};
use querygraph::query::{QueryOptions, TableSpec, UpdateSpec};
use querygraph::sql::{test_utils::validate_sql, QueryCompiler};

async fn music_graph() -> SchemaGraph {
    let provider = StaticSchemaProvider::new("music")
        .with_column("tracks", "id", "int")
        .with_column("tracks", "name", "varchar(255)")
        .with_column("track_artists", "track_id", "int")
        .with_column("track_artists", "artist_id", "int")
        .with_column("artists", "id", "int")
        .with_column("artists", "name", "varchar(255)")
        .with_column("settings", "key", "varchar(64)")
        .with_foreign_key("track_artists", "track_id", "tracks", "id")
        .with_foreign_key("track_artists", "artist_id", "artists", "id");
    SchemaGraph::build(&provider, "music").await.unwrap()
}

#[tokio::test]
async fn test_multi_table_request_with_substring_filter() {
    let graph = music_graph().await;
    let compiler = QueryCompiler::new(&graph);

    let specs: Vec<TableSpec> = serde_json::from_str(
        r#"[
            {"table": "tracks", "attributes": [{"attribute": "name"}]},
            {
                "table": "artists",
                "attributes": [{"attribute": "name"}],
                "constraints": [
                    {"attribute": "name", "operator": "SUBSTRING", "value": "Beat"}
                ]
            }
        ]"#,
    )
    .unwrap();

    let result = compiler.compile(&specs, &QueryOptions::default()).unwrap();

    insta::assert_snapshot!(result.sql, @r"
    SELECT tracks.name AS tracks_name,artists.name AS artists_name
    FROM tracks
    JOIN track_artists ON tracks.id=track_artists.track_id JOIN artists ON track_artists.artist_id=artists.id
    WHERE artists.name LIKE '%Beat%'
    ");

    validate_sql(&result.sql).unwrap();
    assert_eq!(result.term_count, 2);
}

#[tokio::test]
async fn test_aggregated_and_ordered_request() {
    let graph = music_graph().await;
    let compiler = QueryCompiler::new(&graph);

    let specs: Vec<TableSpec> = serde_json::from_str(
        r#"[
            {
                "table": "artists",
                "attributes": [{"attribute": "name"}, {"attribute": "id"}],
                "aggregations": [{"attribute": "id", "type": "COUNT"}],
                "group_by": ["name"]
            },
            {"table": "tracks", "attributes": [{"attribute": "name"}]}
        ]"#,
    )
    .unwrap();
    let options: QueryOptions = serde_json::from_str(
        r#"{
            "order_by": [{"table_name": "artists", "attribute": "id", "sort": "DESC"}],
            "limit": 20
        }"#,
    )
    .unwrap();

    let result = compiler.compile(&specs, &options).unwrap();

    insta::assert_snapshot!(result.sql, @r"
    SELECT artists.name AS artists_name,COUNT(artists.id) AS COUNT_artists_id,tracks.name AS tracks_name
    FROM artists
    JOIN track_artists ON artists.id=track_artists.artist_id JOIN tracks ON track_artists.track_id=tracks.id
    GROUP BY artists.name
    ORDER BY COUNT_artists_id DESC
    LIMIT 20
    ");

    validate_sql(&result.sql).unwrap();
}

#[tokio::test]
async fn test_unconnected_tables_fail_before_producing_text() {
    let graph = music_graph().await;
    let compiler = QueryCompiler::new(&graph);

    let specs: Vec<TableSpec> = serde_json::from_str(
        r#"[
            {"table": "tracks", "attributes": [{"attribute": "name"}]},
            {"table": "settings", "attributes": [{"attribute": "key"}]}
        ]"#,
    )
    .unwrap();

    assert!(compiler.compile(&specs, &QueryOptions::default()).is_err());
}

#[tokio::test]
async fn test_update_round_trip() {
    let provider = StaticSchemaProvider::new("library")
        .with_column("songs", "id", "int")
        .with_column("songs", "title", "varchar(255)");
    let graph = SchemaGraph::build(&provider, "library").await.unwrap();
    let compiler = QueryCompiler::new(&graph);

    let spec: UpdateSpec = serde_json::from_str(
        r#"{
            "table": "songs",
            "updates": [{"attribute": "title", "value": "New"}],
            "constraints": [{"attribute": "id", "operator": "=", "value": "5"}]
        }"#,
    )
    .unwrap();

    let sql = compiler.compile_update(&spec).unwrap();

    insta::assert_snapshot!(sql, @r"
    UPDATE songs
    SET songs.title='New'
    WHERE songs.id=5;
    ");

    validate_sql(&sql).unwrap();
}

#[tokio::test]
async fn test_recompilation_is_byte_identical() {
    let graph = music_graph().await;
    let compiler = QueryCompiler::new(&graph);

    let specs: Vec<TableSpec> = serde_json::from_str(
        r#"[
            {"table": "tracks", "attributes": [{"attribute": "name"}]},
            {"table": "artists", "attributes": [{"attribute": "name"}]}
        ]"#,
    )
    .unwrap();

    let first = compiler.compile(&specs, &QueryOptions::default()).unwrap();
    let second = compiler.compile(&specs, &QueryOptions::default()).unwrap();
    assert_eq!(first.sql, second.sql);
}
