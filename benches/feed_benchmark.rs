use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use gaiatrace::models::{MediaKind, Post, ViewerPrefs, Visibility};
use gaiatrace::services::FeedRanker;

const NOW: i64 = 1_714_557_600_000;

/// Candidate set shaped like a real fetch: 200 posts spread over a week.
fn candidates() -> Vec<Post> {
    (0..200)
        .map(|i: i64| Post {
            id: format!("post-{}", i),
            created_at_millis: Some(NOW - i * 50 * 60 * 1000),
            like_count: (i % 17) as u32,
            echo_count: (i % 5) as u32,
            comment_count: (i % 11) as u32,
            media_kind: if i % 4 == 0 {
                Some(MediaKind::Video)
            } else {
                None
            },
            country: Some(if i % 3 == 0 { "Türkiye" } else { "Germany" }.to_string()),
            city: None,
            visibility: if i % 10 == 0 {
                Visibility::Private
            } else {
                Visibility::Public
            },
            ..Default::default()
        })
        .collect()
}

fn benchmark_rank_feed(c: &mut Criterion) {
    let ranker = FeedRanker::default();
    let posts = candidates();
    let prefs = ViewerPrefs {
        prefer_video: true,
        prefer_text: false,
        country: Some("Türkiye".to_string()),
        city: None,
    };

    let mut group = c.benchmark_group("feed_ranking");

    group.bench_function("rank_200_candidates", |b| {
        b.iter(|| {
            ranker.rank_feed(
                black_box(posts.clone()),
                &prefs,
                NOW,
                Visibility::Public,
                60,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_rank_feed);
criterion_main!(benches);
