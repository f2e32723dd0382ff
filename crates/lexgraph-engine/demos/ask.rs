//! Ask a question against a small two-module knowledge base.
//!
//! ```text
//! cargo run --example ask -- "Can I apply for default judgment?"
//! ```

use anyhow::Result;
use chrono::Utc;
use lexgraph_domain::{Conditional, KnowledgeNode, Modality, ModalityKind, Proposition, SourceType};
use lexgraph_engine::{EngineConfig, HybridSearchEngine};
use lexgraph_index::MemoryIndex;
use lexgraph_module::{Module, ModuleMetadata, StaticModule, ValidationConfig};
use lexgraph_registry::ModuleRegistry;
use std::sync::Arc;

fn order_21() -> Result<Arc<dyn Module>> {
    let rule = KnowledgeNode::new("o21_r1", "Order 21 Rule 1", SourceType::Rule, "order_21")
        .with_what(Proposition::new(
            "Default judgment may be entered where the defendant files no defence",
        ))
        .with_given(Proposition::new("A writ of summons has been served"))
        .with_if_then(Conditional::new(
            "the defendant fails to file a defence in time",
            "the plaintiff may apply for judgment in default",
        ))
        .with_can_must(Modality::new(
            "apply for judgment in default of defence",
            ModalityKind::May,
        ))
        .with_full_text(
            "Where a defendant fails to file a defence within the time limited, \
             the plaintiff may apply for judgment in default of defence.",
        );

    let metadata = ModuleMetadata::new("order_21", "Order 21 - Default Judgment", 0.8, Utc::now())
        .with_topic("default_judgment")
        .with_keyword("default")
        .with_keyword("judgment")
        .with_keyword("defence");

    Ok(Arc::new(StaticModule::load(
        metadata,
        vec![rule],
        ValidationConfig::permissive(),
    )?))
}

fn mediation() -> Result<Arc<dyn Module>> {
    let rule = KnowledgeNode::new("adr_r1", "Order 64 Rule 1", SourceType::Rule, "mediation")
        .with_what(Proposition::new(
            "The court may direct parties to attempt mediation",
        ))
        .with_full_text(
            "The court may direct the parties to attempt mediation or other \
             alternative dispute resolution before setting a matter down for trial.",
        );

    let metadata = ModuleMetadata::new("mediation", "Court-Connected ADR", 0.8, Utc::now())
        .with_topic("mediation")
        .with_keyword("mediation")
        .with_keyword("settlement");

    Ok(Arc::new(StaticModule::load(
        metadata,
        vec![rule],
        ValidationConfig::permissive(),
    )?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Can I apply for default judgment?".to_string());

    let registry = Arc::new(ModuleRegistry::new());
    let mut index = MemoryIndex::new();
    for module in [order_21()?, mediation()?] {
        index.index_module(module.as_ref());
        registry.register(module)?;
    }

    let engine = HybridSearchEngine::new(registry, Arc::new(index), EngineConfig::default());
    let response = engine.query(&question).await?;

    println!("Q: {}", response.query);
    println!("A: {}", response.reasoning.conclusion);
    println!(
        "   hybrid score {:.3} (keyword {:.3}, reasoning {:.3})",
        response.hybrid_score, response.keyword_component, response.reasoning.confidence
    );
    for step in &response.reasoning.chain {
        println!("   [{}] {} - {}", step.dimension, step.citation, step.text);
    }
    for warning in &response.reasoning.warnings {
        println!("   note: {warning}");
    }
    Ok(())
}
