//! Sample documents for reproducible tests.

use sundry_structured::{doc, Document};

/// The document used by the select/remove precedence scenarios.
pub fn filter_sample() -> Document {
    doc!({
        "a": {
            "b": "bbb",
            "c": "ccc",
            "d": [
                {"e": "eee", "f": "fff"},
                {"e": "eee", "g": "ggg"}
            ]
        }
    })
}

/// A deployment manifest with nested maps, lists and scalars.
pub fn deployment() -> Document {
    doc!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": "web",
            "labels": {"app": "web", "tier": "frontend"},
            "annotations": {"example.com/owner": "team-a"}
        },
        "spec": {
            "replicas": 2,
            "template": {
                "spec": {
                    "containers": [
                        {
                            "name": "nginx",
                            "image": "nginx:1.25",
                            "ports": [{"containerPort": 80}],
                            "env": [{"name": "MODE", "value": "prod"}]
                        },
                        {
                            "name": "sidecar",
                            "image": "envoy:1.29",
                            "ports": [{"containerPort": 9901}]
                        }
                    ]
                }
            }
        },
        "status": {"availableReplicas": 2}
    })
}

/// Configuration layers, lowest precedence first.
pub fn config_layers() -> Vec<Document> {
    vec![
        doc!({
            "log": {"level": "info", "outputs": ["stderr"]},
            "features": ["a", "b"],
            "timeout": 30
        }),
        doc!({
            "log": {"outputs": ["file"]},
            "features": ["b", "c"]
        }),
        doc!({
            "log": {"level": "debug"},
            "timeout": null
        }),
    ]
}
