//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use crate::config::RouterConfig;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

fn routes_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "routes:\n  - pattern: /posts/:postId/edit\n    view: PostEdit\n  - pattern: /\n    view: Home\nfallback: NotFound"
    )
    .unwrap();
    file
}

fn run(command: &Commands) -> anyhow::Result<String> {
    let mut out = Vec::new();
    execute(command, &RouterConfig::default(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_check_command_parses() {
    let cli = Cli::try_parse_from(["simple-router", "check", "--routes", "routes.yaml"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Check {
            routes: PathBuf::from("routes.yaml")
        }
    );
}

#[test]
fn test_link_command_with_flags() {
    let cli = Cli::try_parse_from([
        "simple-router",
        "link",
        "--origin",
        "https://www.example.com",
        "--target",
        "_blank",
        "--modified",
        "/relative",
    ])
    .unwrap();

    match cli.command {
        Commands::Link {
            origin,
            target,
            modified,
            href,
        } => {
            assert_eq!(origin, "https://www.example.com");
            assert_eq!(target.as_deref(), Some("_blank"));
            assert!(modified);
            assert_eq!(href, "/relative");
        }
        other => panic!("Expected Link command, got {other:?}"),
    }
}

#[test]
fn test_resolve_requires_url() {
    assert!(Cli::try_parse_from(["simple-router", "resolve", "--routes", "r.yaml"]).is_err());
}

#[test]
fn test_check_lists_routes_in_order() {
    let file = routes_file();
    let out = run(&Commands::Check {
        routes: file.path().to_path_buf(),
    })
    .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "3 routes");
    assert!(lines[1].contains("/posts/:postId/edit") && lines[1].ends_with("PostEdit [postId]"));
    assert!(lines[2].contains('/') && lines[2].ends_with("Home"));
    assert!(lines[3].contains("/:path*") && lines[3].ends_with("NotFound [path]"));
    assert!(!out.contains("warning"));
}

#[test]
fn test_resolve_prints_location_json() {
    let file = routes_file();
    let out = run(&Commands::Resolve {
        routes: file.path().to_path_buf(),
        url: "/posts/23/edit?order=desc".to_string(),
    })
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "pathname": "/posts/23/edit",
            "query": {"order": "desc"},
            "hash": null,
            "params": {"Component": "PostEdit", "postId": "23"},
        })
    );
}

#[test]
fn test_resolve_malformed_url_fails() {
    let file = routes_file();
    let err = run(&Commands::Resolve {
        routes: file.path().to_path_buf(),
        url: "posts/23".to_string(),
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("malformed URL"), "{err:#}");
}

#[test]
fn test_link_decisions() {
    let link = |href: &str, modified: bool| {
        run(&Commands::Link {
            origin: "https://www.example.com".to_string(),
            target: None,
            modified,
            href: href.to_string(),
        })
        .unwrap()
    };
    assert_eq!(link("/relative", false), "intercept\n");
    assert_eq!(link("https://reddit.com", false), "native\n");
    assert_eq!(link("/relative", true), "native\n");
}
