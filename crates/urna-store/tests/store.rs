use tempfile::tempdir;
use urna_catalog::Identifier;
use urna_store::ArtifactStore;

#[tokio::test]
async fn test_concurrent_writes_target_distinct_files() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());

    let ids: Vec<Identifier> = (1..=20)
        .map(|n| Identifier::new("rr", "03018", "0001", format!("{n:04}")))
        .collect();

    let mut handles = Vec::new();
    for id in ids.clone() {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let content = id.section.clone().into_bytes();
            store.write(&id, &content).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for id in &ids {
        let content = std::fs::read(store.path_for(id)).unwrap();
        assert_eq!(content, id.section.as_bytes());
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), ids.len());
}
