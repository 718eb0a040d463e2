//! CLI parse tests.

use clap::Parser;

use super::Cli;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("parse")
}

#[test]
fn cli_parse_single_url() {
    let cli = parse(&[
        "cdl",
        "--manifest",
        "courses.toml",
        "-u",
        "https://www.lynda.com/course-a",
    ]);
    assert_eq!(cli.url.as_deref(), Some("https://www.lynda.com/course-a"));
    assert!(cli.file.is_none());
    assert!(!cli.concurrent);
    assert!(cli.workers.is_none());
}

#[test]
fn cli_parse_url_file_and_concurrent() {
    let cli = parse(&[
        "cdl",
        "--manifest",
        "courses.toml",
        "-f",
        "urls.txt",
        "--concurrent",
    ]);
    assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("urls.txt")));
    assert!(cli.concurrent);
}

#[test]
fn cli_parse_workers_and_cookies() {
    let cli = parse(&[
        "cdl",
        "--manifest",
        "courses.toml",
        "-u",
        "https://example.com/c",
        "--workers",
        "3",
        "--cookies",
        "/tmp/cookies.txt",
    ]);
    assert_eq!(cli.workers, Some(3));
    assert_eq!(
        cli.cookies.as_deref(),
        Some(std::path::Path::new("/tmp/cookies.txt"))
    );
}

#[test]
fn cli_rejects_url_and_file_together() {
    let res = Cli::try_parse_from([
        "cdl",
        "--manifest",
        "courses.toml",
        "-u",
        "https://example.com/c",
        "-f",
        "urls.txt",
    ]);
    assert!(res.is_err());
}

#[test]
fn cli_requires_manifest() {
    let res = Cli::try_parse_from(["cdl", "-u", "https://example.com/c"]);
    assert!(res.is_err());
}

#[test]
fn load_urls_requires_an_input() {
    let cli = parse(&["cdl", "--manifest", "courses.toml"]);
    assert!(cli.load_urls().is_err());
}

#[test]
fn load_urls_reads_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");
    std::fs::write(&path, "https://a.example/1\n\n  https://a.example/2  \n").unwrap();
    let cli = parse(&[
        "cdl",
        "--manifest",
        "courses.toml",
        "-f",
        path.to_str().unwrap(),
    ]);
    let urls = cli.load_urls().unwrap();
    assert_eq!(urls, vec!["https://a.example/1", "https://a.example/2"]);
}

#[test]
fn load_urls_rejects_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");
    std::fs::write(&path, "\n\n").unwrap();
    let cli = parse(&[
        "cdl",
        "--manifest",
        "courses.toml",
        "-f",
        path.to_str().unwrap(),
    ]);
    assert!(cli.load_urls().is_err());
}
