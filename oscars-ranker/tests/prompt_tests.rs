//! Interactive session tests driven by scripted input

mod helpers;

use helpers::{braveheart_payload, sample_awards};
use oscars_ranker::cache::CacheEntry;
use oscars_ranker::cli::{RankingChart, Renderer, TextBarRenderer, UserPrompt};
use oscars_ranker::db::init_memory_pool;
use oscars_ranker::models::Metric;
use oscars_ranker::services::reconcile;
use sqlx::SqlitePool;
use std::io::{self, Cursor};

/// Keeps every chart it is asked to draw
#[derive(Default)]
struct CapturingRenderer {
    charts: Vec<RankingChart>,
}

impl Renderer for CapturingRenderer {
    fn render(&mut self, chart: &RankingChart) -> io::Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

async fn reconciled_pool() -> SqlitePool {
    let pool = init_memory_pool().await.unwrap();
    let cache = CacheEntry {
        awards_data: sample_awards(),
        movies_data: vec![braveheart_payload()],
    };
    reconcile(&pool, &cache).await.unwrap();
    pool
}

async fn run_session(pool: &SqlitePool, script: &str) -> (String, Vec<RankingChart>) {
    let mut renderer = CapturingRenderer::default();
    let mut prompt = UserPrompt::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    prompt.run(pool, &mut renderer).await.unwrap();
    let output = String::from_utf8(prompt.into_output()).unwrap();
    (output, renderer.charts)
}

#[tokio::test]
async fn test_full_selection_renders_chart() {
    let pool = reconciled_pool().await;

    let (output, charts) = run_session(&pool, "1995\n1\n1\nexit\n").await;

    assert!(output.contains("1. Best Picture"));
    assert!(output.contains("2. Directing"));
    assert!(output.contains("4. Metascore"));
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].year, 1995);
    assert_eq!(charts[0].category, "Best Picture");
    assert_eq!(charts[0].metric, Metric::Runtime);
    assert_eq!(charts[0].nominees.len(), 1);
    assert_eq!(charts[0].nominees[0].name, "Braveheart");
}

#[tokio::test]
async fn test_invalid_input_reprompts() {
    let pool = reconciled_pool().await;

    let (output, charts) = run_session(&pool, "abc\n1926\n1995\n7\nx\n2\n0\n5\n3\nexit\n").await;

    assert_eq!(output.matches("ERROR - please enter a valid year").count(), 2);
    assert_eq!(
        output
            .matches("ERROR - please enter a number from the list above")
            .count(),
        4
    );
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].category, "Directing");
    assert_eq!(charts[0].metric, Metric::RottenTomatoes);
}

#[tokio::test]
async fn test_year_without_ranked_categories() {
    let pool = reconciled_pool().await;

    let (output, charts) = run_session(&pool, "1939\nEXIT\n").await;

    assert!(output.contains("No ranked categories for 1939"));
    assert!(charts.is_empty());
}

#[tokio::test]
async fn test_exit_at_any_prompt() {
    let pool = reconciled_pool().await;

    let (_, charts) = run_session(&pool, "1995\n1\n  Exit \n").await;
    assert!(charts.is_empty());

    let (_, charts) = run_session(&pool, "1995\nexit\n").await;
    assert!(charts.is_empty());
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let pool = reconciled_pool().await;

    let (output, charts) = run_session(&pool, "1995\n1\n").await;

    assert!(output.contains("Choose a criterion for ranking the nominees: "));
    assert!(charts.is_empty());
}

#[tokio::test]
async fn test_text_renderer_in_session() {
    let pool = reconciled_pool().await;
    let mut renderer = TextBarRenderer::new(Vec::new());
    let mut prompt = UserPrompt::new(Cursor::new(b"1995\n1\n1\n".to_vec()), io::sink());

    prompt.run(&pool, &mut renderer).await.unwrap();

    let chart = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(chart.starts_with("1995 Best Picture Nominees by Runtime\n"));
    assert!(chart.contains("Braveheart"));
    assert!(chart.contains(" 178"));
}
