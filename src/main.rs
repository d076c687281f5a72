// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;
use std::time::Instant;

use the_tasktree::config::{load_and_validate_graph_config, GraphBuilder, ProcessorRegistry};
use the_tasktree::engine::Step;
use the_tasktree::graph::{Task, TaskGraph, TaskId};
use the_tasktree::traits::{merge_fn, processor_fn, processor_fn_async};
use tracing_subscriber::EnvFilter;

/// Text processors that graph configuration files can refer to by name.
fn text_registry() -> ProcessorRegistry<String> {
    let mut registry = ProcessorRegistry::new();
    registry
        .register_processor("trim", processor_fn(|s: String| Ok(s.trim().to_string())))
        .register_processor("uppercase", processor_fn(|s: String| Ok(s.to_uppercase())))
        .register_processor("lowercase", processor_fn(|s: String| Ok(s.to_lowercase())))
        .register_processor("reverse", processor_fn(|s: String| Ok(s.chars().rev().collect())))
        .register_processor(
            "word_count",
            processor_fn(|s: String| Ok(s.split_whitespace().count().to_string())),
        )
        .register_processor(
            "char_count",
            processor_fn(|s: String| Ok(s.chars().count().to_string())),
        )
        .register_processor(
            "slow_echo",
            processor_fn_async(|s: String| async move {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                Ok(s)
            }),
        )
        .register_merge("join_lines", merge_fn(|lines: Vec<String>| Ok(lines.join("\n"))))
        .register_merge("concat", merge_fn(|parts: Vec<String>| Ok(parts.concat())));
    registry
}

/// Graph assembled in code: trim, then a bracketing step, then three reports side by side.
fn builtin_graph() -> Result<(TaskGraph<String>, TaskId), Box<dyn std::error::Error>> {
    let bracket = Step::serial(vec![
        processor_fn(|s: String| Ok(format!("[{}", s))),
        processor_fn(|s: String| Ok(format!("{}]", s))),
    ]);

    let mut graph = TaskGraph::new();
    let trim = graph.add_task(
        Task::with_processor(processor_fn(|s: String| Ok(s.trim().to_string()))).named("trim"),
    );
    let report = graph.add_task(
        Task::with_processor(Arc::new(bracket))
            .merge(merge_fn(|lines: Vec<String>| Ok(lines.join("\n"))))
            .named("report"),
    );
    let upper = graph.add_task(
        Task::with_processor(processor_fn(|s: String| Ok(s.to_uppercase()))).named("upper"),
    );
    let reverse = graph.add_task(
        Task::with_processor(processor_fn(|s: String| Ok(s.chars().rev().collect())))
            .named("reverse"),
    );
    let words = graph.add_task(
        Task::with_processor(processor_fn(|s: String| {
            Ok(format!("{} words", s.split_whitespace().count()))
        }))
        .named("words"),
    );

    graph.add_child(trim, &[report])?;
    graph.add_child(report, &[upper, reverse, words])?;
    Ok((graph, trim))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("the_tasktree=info,warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} [graph1.yaml ...] <input_text>", args[0]);
        eprintln!("Example: {} \"  hello tree  \"", args[0]);
        eprintln!("Example: {} configs/text-pipeline.yaml \"  hello tree  \"", args[0]);
        std::process::exit(1);
    }

    // The last argument is the input text, everything between is a graph config
    let input_text = &args[args.len() - 1];
    let config_files = &args[1..args.len() - 1];

    println!("Input: \"{}\"", input_text);

    if config_files.is_empty() {
        if let Err(e) = run_builtin(input_text).await {
            eprintln!("Built-in pipeline failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut failed = false;
    for config_file in config_files {
        println!("\n{}", "-".repeat(60));
        if let Err(e) = run_single_config(config_file, input_text).await {
            eprintln!("Failed to execute {}: {}", config_file, e);
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

async fn run_builtin(input_text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (graph, root) = builtin_graph()?;
    println!("Graph: built-in ({} tasks)", graph.len());

    let graph = Arc::new(graph);
    let start = Instant::now();
    let output = graph.execute(root, input_text.to_string()).await?;

    print_output("trim", &output, start);
    Ok(())
}

async fn run_single_config(
    config_file: &str,
    input_text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_and_validate_graph_config(config_file)?;
    let built = GraphBuilder::build(&config, &text_registry())?;

    println!("Graph: {} ({} tasks)", config_file, built.graph.len());
    println!("Options: {:?}", built.graph.options());

    let roots = built.graph.roots();
    let graph = Arc::new(built.graph);

    for root in roots {
        let name = graph
            .node(root)
            .map(|node| node.name().to_string())
            .unwrap_or_else(|| root.to_string());
        let start = Instant::now();
        let output = graph.execute(root, input_text.to_string()).await?;
        print_output(&name, &output, start);
    }
    Ok(())
}

fn print_output(root: &str, output: &str, start: Instant) {
    println!("Root '{}' finished in {:?}:", root, start.elapsed());
    for line in output.lines() {
        println!("  {}", line);
    }
}
