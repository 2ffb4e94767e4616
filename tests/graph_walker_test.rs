//! Integration tests for GraphWalker path enumeration

use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;
use tokenlattice::prelude::*;

fn walker(notation: &str) -> GraphWalker<CannedTokenSource> {
    GraphWalker::new(GraphTokenizer::new().source(notation).unwrap())
}

fn text<S: TokenSource>(walker: &GraphWalker<S>) -> String {
    walker
        .current_token()
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

fn path_strings(paths: &[LatticePath]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_graph_token_stream() -> Result<()> {
    let mut graph = walker("a b/c d e/f:3 g/h i j k");

    // no base yet, so no paths
    assert!(!graph.increment_graph()?);
    assert_eq!(graph.cached_token_count(), 0);

    // base a: a b d, then a c d
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "a");
    assert_eq!(graph.current_token().unwrap().position_increment, 1);
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "b");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "d");
    assert_eq!(graph.cached_token_count(), 4);

    assert!(graph.increment_graph()?);
    assert_eq!(graph.cached_token_count(), 5);
    assert_eq!(text(&graph), "a");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "c");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "d");
    assert!(!graph.increment_graph()?);
    assert_eq!(graph.cached_token_count(), 5);

    // base b: b d e, then b d f
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "b");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "d");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "e");
    assert!(graph.increment_graph()?);
    assert_eq!(text(&graph), "b");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "d");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "f");
    assert!(!graph.increment_graph()?);

    // base c is an alternate of b
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "c");
    assert_eq!(graph.current_token().unwrap().position_increment, 0);
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "d");
    assert!(!graph.increment_graph()?);

    // base d: d e g, d e h, d f j
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "d");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "e");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "g");
    assert!(graph.increment_graph()?);
    assert_eq!(text(&graph), "d");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "e");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "h");
    assert!(graph.increment_graph()?);
    assert_eq!(text(&graph), "d");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "f");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "j");
    assert!(!graph.increment_graph()?);

    // base e: e g i j, then e h
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "e");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "g");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "i");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "j");
    assert!(graph.increment_graph()?);
    assert_eq!(text(&graph), "e");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "h");
    assert!(!graph.increment_graph()?);

    // base f spans three positions
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "f");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "j");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "k");
    assert!(!graph.advance_path()?);
    assert!(!graph.increment_graph()?);

    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "g");
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "i");
    assert!(!graph.increment_graph()?);

    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "h");
    assert!(!graph.increment_graph()?);

    // i, j, k
    assert!(graph.advance_base()?);
    assert!(graph.advance_base()?);
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "k");
    assert!(!graph.advance_path()?);
    assert_eq!(graph.trailing_positions(), 0);
    assert!(!graph.increment_graph()?);
    assert!(!graph.advance_base()?);
    assert_eq!(graph.cached_token_count(), 11);

    Ok(())
}

#[test]
fn test_trailing_positions() -> Result<()> {
    // a/b:2 c _
    let tokens = vec![
        Token::with_offsets("a", 0, 1),
        Token::with_offsets("b", 0, 1)
            .with_position_increment(0)
            .with_position_length(2),
        Token::with_offsets("c", 2, 3),
    ];
    let source = CannedTokenSource::new(tokens).with_end(SourceEnd {
        final_position_increment: 1,
        final_offset: 5,
    });
    let mut graph = GraphWalker::new(source);

    assert!(!graph.increment_graph()?);
    assert!(graph.advance_base()?);
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "c");
    assert!(!graph.advance_path()?);
    assert_eq!(graph.trailing_positions(), 1);
    assert!(!graph.increment_graph()?);

    // b covers c's position, so nothing follows it
    assert!(graph.advance_base()?);
    assert_eq!(text(&graph), "b");
    assert!(!graph.advance_path()?);
    assert_eq!(graph.trailing_positions(), 1);
    assert!(!graph.increment_graph()?);
    assert_eq!(graph.final_offset(), Some(5));

    Ok(())
}

#[test]
fn test_trailing_positions_from_notation() -> Result<()> {
    let mut graph = walker("a/b:2 c _");
    let bases = graph.enumerate()?;

    let trailing: Vec<(String, Vec<usize>)> = bases
        .iter()
        .map(|b| {
            (
                b.base.text.clone(),
                b.paths.iter().map(|p| p.trailing_positions).collect(),
            )
        })
        .collect();
    assert_eq!(
        trailing,
        vec![
            ("a".to_string(), vec![1]),
            ("b".to_string(), vec![1]),
            ("c".to_string(), vec![1]),
        ]
    );
    Ok(())
}

#[test]
fn test_trailing_positions_at_a_hole() -> Result<()> {
    // nothing starts at node 1, so a's path stops there while b and c are still ahead
    let mut graph = walker("a _ b c");
    assert!(graph.advance_base()?);
    assert!(!graph.advance_path()?);
    assert_eq!(graph.cached_token_count(), 2);
    assert_eq!(graph.final_offset(), None);
    assert_eq!(graph.trailing_positions(), 2);
    assert!(!graph.increment_graph()?);

    // a b ends at the hole at node 2; x already reaches node 3
    let mut graph = walker("a/x:3 b _ c");
    assert!(graph.advance_base()?);
    assert!(graph.advance_path()?);
    assert_eq!(text(&graph), "b");
    assert!(!graph.advance_path()?);
    assert_eq!(graph.final_offset(), None);
    assert_eq!(graph.trailing_positions(), 2);
    Ok(())
}

#[test]
fn test_maximum_graph_cache_size() {
    let tokens: Vec<Token> = (0..105)
        .map(|i| Token::with_offsets("a", i * 2, i * 2 + 1))
        .collect();
    let mut graph = GraphWalker::new(CannedTokenSource::new(tokens));

    let result = (|| -> Result<()> {
        graph.reset()?;
        graph.advance_base()?;
        loop {
            graph.advance_path()?;
        }
    })();
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Too many cached tokens (> 100)");

    // after reset the cache is cleared and we can read ahead once more
    graph.reset().unwrap();
    assert!(graph.advance_base().unwrap());
    assert!(graph.advance_path().unwrap());
}

#[test]
fn test_cache_overflow_from_long_alternate_run() {
    // 101 alternates all start at node 0; finding what follows node 1 pulls them all
    let mut notation = vec!["x"; 101].join("/");
    notation.push_str(" y");
    let mut graph = walker(&notation);

    assert!(graph.advance_base().unwrap());
    let err = graph.advance_path().unwrap_err();
    assert!(matches!(err, LatticeError::CacheOverflow { limit: 100 }));
}

#[test]
fn test_advancing_base_releases_cache() -> Result<()> {
    // a long linear stream is fine as long as the lookahead stays short
    let notation = vec!["w"; 500].join(" ");
    let mut graph = walker(&notation);

    let mut bases = 0;
    while graph.advance_base()? {
        bases += 1;
        assert!(graph.advance_path()? || bases == 500);
    }
    assert_eq!(bases, 500);
    assert_eq!(graph.cached_token_count(), 500);
    Ok(())
}

#[test]
fn test_graph_path_count_limits() {
    let mut tokens = vec![Token::with_offsets("term", 0, 1), Token::with_offsets("term1", 2, 3)];
    for i in 2..50 {
        tokens.push(Token::with_offsets(format!("term{i}"), 2, 3).with_position_increment(i % 2));
    }
    let mut graph = GraphWalker::new(CannedTokenSource::new(tokens));

    let result = (|| -> Result<()> {
        graph.reset()?;
        graph.advance_base()?;
        for _ in 0..10 {
            graph.advance_path()?;
        }
        while graph.increment_graph()? {
            for _ in 0..10 {
                graph.advance_path()?;
            }
        }
        Ok(())
    })();
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Too many graph paths (> 1000)");

    // the failed session refuses work until it is reset with a smaller lattice
    assert!(matches!(
        graph.advance_path(),
        Err(LatticeError::InvalidOperation(_))
    ));
    graph
        .reset_with_source(GraphTokenizer::new().source("a b/c d").unwrap())
        .unwrap();
    assert!(graph.advance_base().unwrap());
    assert_eq!(path_strings(&graph.collect_paths().unwrap()), vec!["a b d", "a c d"]);
}

#[test]
fn test_linear_lattice_has_one_path() -> Result<()> {
    let mut graph = walker("a b c d e");
    assert!(graph.advance_base()?);

    let mut visited = 1;
    while graph.advance_path()? {
        visited += 1;
    }
    assert_eq!(visited, 5);
    assert!(!graph.increment_graph()?);
    Ok(())
}

#[test]
fn test_independent_branch_points_multiply() -> Result<()> {
    let mut graph = walker("a b/c d e/f/g h i/j");
    assert!(graph.advance_base()?);
    let paths = path_strings(&graph.collect_paths()?);

    assert_eq!(paths.len(), 2 * 3 * 2);
    let distinct: HashSet<&String> = paths.iter().collect();
    assert_eq!(distinct.len(), paths.len());
    assert_eq!(paths[0], "a b d e h i");
    assert_eq!(paths[11], "a c d g h j");
    Ok(())
}

#[test]
fn test_multi_position_synonym() -> Result<()> {
    // "ml" spans "machine learning"
    let mut graph = walker("machine/ml:2 learning tutorial");
    let bases = graph.enumerate()?;

    assert_eq!(bases.len(), 4);
    assert_eq!(
        path_strings(&bases[0].paths),
        vec!["machine learning tutorial"]
    );
    assert_eq!(path_strings(&bases[1].paths), vec!["ml tutorial"]);
    Ok(())
}

#[test]
fn test_reset_reproduces_enumeration() -> Result<()> {
    let mut graph = walker("a b/c d e/f:3 g/h i j k");
    let first = graph.enumerate()?;
    let pulled = graph.cached_token_count();

    graph.reset()?;
    assert_eq!(graph.cached_token_count(), 0);
    let second = graph.enumerate()?;

    assert_eq!(first, second);
    assert_eq!(graph.cached_token_count(), pulled);
    Ok(())
}

#[test]
fn test_invalid_token_ends_session() {
    let mut graph = walker("a b:0 c");
    assert!(graph.advance_base().unwrap());
    let err = graph.advance_path().unwrap_err();
    assert!(matches!(err, LatticeError::InvalidToken(_)));
    assert!(graph.increment_graph().is_err());
}

#[test]
fn test_config_from_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("walker.json");
    fs::write(&config_path, r#"{"max_graph_paths": 3}"#)?;

    let config = WalkerConfig::from_json_file(&config_path)?;
    assert_eq!(config.max_graph_paths, 3);
    assert_eq!(config.max_cached_tokens, 100);

    let source = GraphTokenizer::new().source("a b/c d/e")?;
    let mut graph = GraphWalker::with_config(source, config)?;
    assert!(graph.advance_base()?);
    let err = graph.collect_paths().unwrap_err();
    assert!(matches!(err, LatticeError::PathOverflow { limit: 3 }));
    Ok(())
}

#[test]
fn test_json_token_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let token_path = temp_dir.path().join("tokens.json");
    fs::write(
        &token_path,
        r#"{
            "tokens": [
                {"text": "wi", "start_offset": 0, "end_offset": 2},
                {"text": "wifi", "start_offset": 0, "end_offset": 5,
                 "position_increment": 0, "position_length": 2},
                {"text": "fi", "start_offset": 3, "end_offset": 5},
                {"text": "network", "start_offset": 6, "end_offset": 13}
            ],
            "final_offset": 13
        }"#,
    )?;

    let source = CannedTokenSource::from_json_file(&token_path)?;
    let mut graph = GraphWalker::new(source);
    let bases = graph.enumerate()?;
    assert_eq!(path_strings(&bases[0].paths), vec!["wi fi network"]);
    assert_eq!(path_strings(&bases[1].paths), vec!["wifi network"]);
    assert_eq!(path_strings(&bases[2].paths), vec!["fi network"]);
    assert_eq!(graph.final_offset(), Some(13));
    Ok(())
}

#[test]
fn test_json_token_file_rejects_negative_increment() {
    let temp_dir = TempDir::new().unwrap();
    let token_path = temp_dir.path().join("tokens.json");
    fs::write(
        &token_path,
        r#"[{"text": "a"}, {"text": "b", "position_increment": -1}]"#,
    )
    .unwrap();

    let err = CannedTokenSource::from_json_file(&token_path).unwrap_err();
    assert!(matches!(err, LatticeError::InvalidToken(_)));
}
