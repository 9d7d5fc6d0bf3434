//! Backend demotion: a failed remote construction must leave the service on
//! a working local store, and training must then persist to the local file.

use serde_json::json;
use tempfile::TempDir;

use recal_core::config::{BackendKind, RecalConfig, RemoteConfig};
use recal_core::types::{Algo, DocKey, Scope, TrainRequest};
use recal_engine::CalibrationService;
use recal_store::{FeedbackStore, LocalStore};

fn config_with_broken_remote(dir: &TempDir) -> RecalConfig {
    let mut config = RecalConfig::default();
    config.store.local_path = dir.path().join("store.json").display().to_string();
    // Empty api_key makes remote construction fail deterministically.
    config.store.remote = Some(RemoteConfig {
        base_url: "https://docs.example.com".into(),
        api_key: String::new(),
    });
    config
}

#[test]
fn broken_remote_demotes_and_training_persists_locally() {
    let dir = TempDir::new().unwrap();
    let service = CalibrationService::from_config(&config_with_broken_remote(&dir)).unwrap();
    assert_eq!(service.backend(), BackendKind::Local);

    // Seed feedback through a second handle onto the same file.
    let seeder = LocalStore::open(&dir.path().join("store.json")).unwrap();
    for i in 0..24 {
        let positive = i % 2 == 0;
        let doc = json!({
            "model": { "p_final_raw": if positive { 0.8 } else { 0.2 } },
            "rating": if positive { 5 } else { 1 }
        });
        seeder
            .set(
                &DocKey::Feedback { uid: "u1".into(), id: format!("m{i}") },
                doc.as_object().unwrap().clone(),
                false,
            )
            .unwrap();
    }

    let report = service
        .train(&TrainRequest {
            scope: Scope::User,
            uid: Some("u1".into()),
            algo: Algo::Both,
            min_samples: 20,
        })
        .unwrap();
    assert!(report.ok);

    // The profile landed in the local file, visible to any other handle.
    let profile_doc = seeder
        .get(&DocKey::CalibrationUser { uid: "u1".into() })
        .unwrap();
    assert_eq!(profile_doc.get("sample_count"), Some(&json!(24)));
    assert!(profile_doc.get("platt").is_some());
    assert!(profile_doc.get("isotonic").is_some());

    let latest = service.latest_eval().unwrap().unwrap();
    assert_eq!(latest.run_id, report.eval_run_id);
}

#[test]
fn health_reports_active_models_and_backend() {
    let dir = TempDir::new().unwrap();
    let service = CalibrationService::from_config(&config_with_broken_remote(&dir)).unwrap();

    let health = service.health();
    assert!(health.ok);
    assert_eq!(health.store_backend, "local");
    assert!(!health.zsl_model.is_empty());

    service.reload_models(Some("org/tuned-zsl".into()), None);
    let health = service.health();
    assert_eq!(health.zsl_model, "org/tuned-zsl");
    // The untouched slot keeps its configured identifier.
    assert!(!health.nli_model.is_empty());
}
