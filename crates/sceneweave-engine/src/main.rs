//! Demo driver for the sceneweave editor core.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sceneweave_engine::prelude::*;
use sceneweave_graph::{NodePayload, SceneData, SubScene};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sceneweave", version, about = "Scene-workflow graph engine demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted editing session over the demo workflow
    Demo,
    /// Print the built-in connection rule table
    Rules,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(),
        Command::Rules => print_rules(),
    }
}

fn demo_document() -> GraphSnapshot {
    let scene_with_subs = |id: &str, title: &str, subs: &[(&str, &str)], x: f32, y: f32| {
        let mut data = SceneData::new(title);
        data.sub_scenes = subs
            .iter()
            .map(|(sub_id, name)| SubScene::new(*sub_id, *name))
            .collect();
        Node::new(
            NodeId::new(id),
            NodeKind::BigScene,
            Position::new(x, y),
            NodePayload::Scene(data),
        )
    };
    let flow = |id: &str, kind: NodeKind, title: &str, x: f32, y: f32| {
        Node::new(
            NodeId::new(id),
            kind,
            Position::new(x, y),
            NodePayload::Flow {
                title: title.to_string(),
            },
        )
    };
    let edge = |id: &str, source: &str, target: &str| Edge {
        id: sceneweave_graph::EdgeId::new(id),
        ..Edge::structural(NodeId::new(source), NodeId::new(target))
    };

    GraphSnapshot::new(
        vec![
            flow("start_0", NodeKind::Start, "Start", 100.0, 200.0),
            flow("enter_guide_1", NodeKind::EnterGuide, "Enter Guide", 350.0, 180.0),
            scene_with_subs(
                "big_scene_1",
                "Big Scene 1",
                &[("sub_1", "Sub-scene 1"), ("sub_2", "Sub-scene 2")],
                600.0,
                100.0,
            ),
            scene_with_subs("big_scene_2", "Big Scene 2", &[], 850.0, 80.0),
            flow("exit_guide_1", NodeKind::ExitGuide, "Exit Guide", 600.0, 280.0),
            flow("end_0", NodeKind::End, "End", 850.0, 260.0),
        ],
        vec![
            edge("edge_1", "start_0", "enter_guide_1"),
            edge("edge_2", "enter_guide_1", "big_scene_1"),
            edge("edge_3", "big_scene_1", "big_scene_2"),
            edge("edge_4", "big_scene_1", "exit_guide_1"),
            edge("edge_5", "exit_guide_1", "end_0"),
        ],
    )
}

fn run_demo() -> Result<()> {
    let mut engine = EditorEngine::from_document(&demo_document());
    let store_stats = |engine: &EditorEngine| {
        let ctx = engine.context();
        (ctx.store.node_count(), ctx.store.edge_count())
    };

    println!("Sceneweave demo session");
    println!("=======================");
    let (nodes, edges) = store_stats(&engine);
    println!("Loaded demo workflow: {nodes} nodes, {edges} edges");
    println!();

    // Connection attempts through the gate.
    let attempts = [
        ("start_0", "big_scene_2"),
        ("big_scene_2", "big_scene_1"),
        ("big_scene_2", "end_0"),
    ];
    for (source, target) in attempts {
        match engine.connect(&ProposedConnection::new(source, target)) {
            Ok(_) => println!("connect {source} -> {target}: ok"),
            Err(err) => println!("connect {source} -> {target}: {err}"),
        }
    }
    println!();

    // Description lifecycle on the first scene.
    let scene = NodeId::new("big_scene_1");
    let shared = engine.generate_shared(&scene)?;
    println!("generated shared description {shared}");

    let exclusive = engine.generate_exclusive(&scene, 0)?;
    println!("generated exclusive description {exclusive} for sub-scene 1");

    let remaining_link = engine
        .context()
        .store
        .edges_into(&shared)
        .pop()
        .expect("shared node keeps sub-scene 2's edge");
    engine.remove_edges(&[remaining_link.id]);
    let collected = engine.context().store.node(&shared).is_none();
    println!("removed last shared link; shared node collected: {collected}");
    println!();

    // Undo back to the loaded document, then redo everything.
    let mut undone = 0;
    while engine.undo() {
        undone += 1;
    }
    let mut redone = 0;
    while engine.redo() {
        redone += 1;
    }
    println!("undid {undone} edits, redid {redone}");

    let (nodes, edges) = store_stats(&engine);
    println!("Final graph: {nodes} nodes, {edges} edges");
    Ok(())
}

fn print_rules() -> Result<()> {
    let catalog = NodeCatalog::with_defaults();

    println!("Built-in connection rules");
    println!("=========================");
    for kind in NodeKind::all() {
        let Some(entry) = catalog.lookup(kind) else {
            continue;
        };
        let rules = &entry.rules;
        let targets = rules.allowed_targets.as_ref().map_or_else(
            || "unrestricted".to_string(),
            |kinds| {
                kinds
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        );
        let fmt_limit =
            |limit: Option<u32>| limit.map_or_else(|| "inf".to_string(), |l| l.to_string());
        println!(
            "{:<12} targets: {:<42} out: {:<4} in: {}",
            kind.as_str(),
            targets,
            fmt_limit(rules.max_outgoing),
            fmt_limit(rules.max_incoming),
        );
    }
    Ok(())
}
