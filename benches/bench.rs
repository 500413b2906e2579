// Criterion benchmarks for Style Rank

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use style_rank::core::{cosine_similarity, match_references, RankingOptions, Recommender};
use style_rank::models::{
    BudgetTier, CatalogItem, Category, Label, Occasion, Price, RankQuery, RankingWeights,
    ReferenceProfile,
};

const DIMENSION: usize = 384;

/// Deterministic pseudo-random unit vector
fn vector(seed: usize) -> Vec<f32> {
    let raw: Vec<f32> = (0..DIMENSION)
        .map(|i| (((seed * 31 + i * 17) % 97) as f32 / 97.0) - 0.5)
        .collect();
    let norm = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
    raw.into_iter().map(|x| x / norm).collect()
}

const TAGS: [&str; 8] = [
    "Minimalist", "Modern", "Classic", "Statement", "Traditional", "Glamorous", "Delicate", "Bold",
];
const OCCASIONS: [&str; 4] = ["Daily Wear", "Weddings", "Cocktail Parties", "Office Wear"];
const CATEGORIES: [Category; 5] = [
    Category::Necklaces,
    Category::Earrings,
    Category::Rings,
    Category::Pendants,
    Category::Bracelets,
];

fn create_reference(id: usize) -> ReferenceProfile {
    ReferenceProfile {
        id: id.to_string(),
        name: format!("Reference {}", id),
        primary_tags: vec![Label::parse(TAGS[id % 8]), Label::parse(TAGS[(id + 3) % 8])],
        secondary_tags: vec![Label::parse(TAGS[(id + 5) % 8])],
        description: String::new(),
        image_url: None,
        embedding: vector(id),
    }
}

fn create_item(id: usize) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: format!("Item {}", id),
        category: CATEGORIES[id % 5],
        price: Price::amount(5_000.0 + (id % 60) as f64 * 5_000.0),
        primary_tags: vec![Label::parse(TAGS[id % 8]), Label::parse(TAGS[(id / 8) % 8])],
        secondary_tags: vec![Label::parse(TAGS[(id + 1) % 8])],
        occasions: vec![Label::parse(OCCASIONS[id % 4])],
        description: String::new(),
        vibe_description: String::new(),
        image_url: None,
        embedding: vector(id + 1_000),
    }
}

fn create_engine(catalog_size: usize) -> Recommender {
    let references = (0..30).map(create_reference).collect();
    let catalog = (0..catalog_size).map(create_item).collect();
    Recommender::new(references, catalog, RankingWeights::default(), RankingOptions::default())
        .expect("benchmark data is valid")
}

fn create_query() -> RankQuery {
    RankQuery {
        vector: vector(7),
        occasions: vec![Label::Known(Occasion::Weddings), Label::Known(Occasion::DailyWear)],
        budget: Label::Known(BudgetTier::Moderate),
        top_n: 10,
        threshold: 0.4,
        explain: false,
    }
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let a = vector(1);
    let b = vector(2);

    c.bench_function("cosine_similarity_384", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)));
    });
}

fn bench_match_references(c: &mut Criterion) {
    let references: Vec<ReferenceProfile> = (0..30).map(create_reference).collect();
    let query = vector(7);

    c.bench_function("match_references_30", |b| {
        b.iter(|| match_references(black_box(&query), black_box(&references), 3, 0.4));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let query = create_query();

    let mut group = c.benchmark_group("recommend");

    for catalog_size in [50, 200, 1000].iter() {
        let engine = create_engine(*catalog_size);

        group.bench_with_input(
            BenchmarkId::new("recommend", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| engine.recommend(black_box(&query)).map(|r| r.items.len()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cosine_similarity,
    bench_match_references,
    bench_recommend
);

criterion_main!(benches);
