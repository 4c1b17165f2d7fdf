//! Content-based product recommendation.
//!
//! Matches a skin problem to catalog products by bag-of-effects overlap:
//! a product's score is the number of canonical effects it shares with
//! the problem's target set. Scores live only in the per-query result —
//! the shared catalog is never written, so `recommend` is safe to call
//! concurrently over the same `&Catalog`.

use crate::catalog::{Catalog, Product};
use crate::problem::SkinProblem;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Result ordering for a recommendation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Match score, descending. Ties keep catalog order.
    #[default]
    Relevance,
    /// Product name, ascending.
    Name,
    /// Numeric price, ascending. Digit-free prices sort last.
    Price,
    /// Brand, ascending.
    Brand,
}

/// Query parameters for one recommendation call.
#[derive(Debug, Clone)]
pub struct RecommendQuery {
    /// Maximum number of results; 0 yields an empty result.
    pub top_n: usize,
    pub sort: SortOrder,
    /// Case-insensitive substring filter on the product name.
    pub search: Option<String>,
}

impl Default for RecommendQuery {
    fn default() -> Self {
        Self {
            top_n: 10,
            sort: SortOrder::Relevance,
            search: None,
        }
    }
}

/// A scored, query-local view of one catalog product.
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub product: &'a Product,
    /// Count of canonical effects shared with the problem's target set.
    pub match_score: usize,
}

/// Recommend products for a skin problem.
///
/// Unknown problem identifiers resolve to an empty target set and
/// therefore an empty result — never an error. Effect matching, problem
/// lookup and search are all case-insensitive.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    problem_id: &str,
    query: &RecommendQuery,
) -> Vec<Recommendation<'a>> {
    if query.top_n == 0 {
        return Vec::new();
    }

    let Ok(problem) = problem_id.parse::<SkinProblem>() else {
        tracing::debug!(problem_id, "unknown skin problem, empty recommendation");
        return Vec::new();
    };

    let targets: HashSet<String> = problem
        .target_effects()
        .iter()
        .map(|e| e.to_lowercase())
        .collect();

    // Whitespace in the query is significant: "cleanser " only matches
    // names containing that trailing space. Only the empty string means
    // "no search".
    let search_lower = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<Recommendation<'a>> = catalog
        .products()
        .iter()
        .map(|product| Recommendation {
            product,
            match_score: match_score(product, &targets),
        })
        .filter(|r| r.match_score > 0)
        .filter(|r| match &search_lower {
            Some(needle) => r.product.name.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    sort_results(&mut results, query.sort);
    results.truncate(query.top_n);

    tracing::debug!(
        problem = %problem,
        returned = results.len(),
        sort = ?query.sort,
        "recommendation computed"
    );
    results
}

/// Set-intersection cardinality between a product's canonical effects
/// and the lower-cased target set. Duplicate product effects count once.
fn match_score(product: &Product, targets_lower: &HashSet<String>) -> usize {
    product
        .effects
        .iter()
        .map(|e| e.to_lowercase())
        .collect::<HashSet<_>>()
        .intersection(targets_lower)
        .count()
}

fn sort_results(results: &mut [Recommendation<'_>], sort: SortOrder) {
    match sort {
        SortOrder::Relevance => results.sort_by_key(|r| Reverse(r.match_score)),
        SortOrder::Name => results.sort_by(|a, b| a.product.name.cmp(&b.product.name)),
        SortOrder::Brand => results.sort_by(|a, b| a.product.brand.cmp(&b.product.brand)),
        SortOrder::Price => {
            let unparsable = results
                .iter()
                .filter(|r| parse_price(&r.product.price).is_none())
                .count();
            if unparsable > 0 {
                tracing::debug!(unparsable, "digit-free prices sort last under price order");
            }
            // None sorts after every Some — digit-free prices go last,
            // stable among themselves.
            results.sort_by_key(|r| match parse_price(&r.product.price) {
                Some(value) => (false, value),
                None => (true, 0),
            });
        }
    }
}

/// Extract the numeric value of a locally formatted price string by
/// stripping every non-digit byte ("Rp150.000" → 150000). Returns `None`
/// when the string contains no digits at all.
pub fn parse_price(price: &str) -> Option<u64> {
    let digits: String = price.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectNormalizer;

    const SAMPLE_CSV: &str = "\
product_name,brand,notable_effects,price,description,product_href,picture_src
Cetaphil Gentle Cleanser,Cetaphil,\"soothing & calming\",Rp150.000,Mild cleanser,https://example.com/1,https://example.com/1.jpg
Acne Duo Serum,Somethinc,\"anti-acne, soothing\",Rp120.000,Double action,https://example.com/2,https://example.com/2.jpg
Brightening Essence,Azarine,\"brightening, glowing\",Rp85.000,Tone-up essence,https://example.com/3,https://example.com/3.jpg
Oil Stop Toner,Acnes,\"mild oil-control\",gratis,Sebum toner,https://example.com/4,https://example.com/4.jpg
Plain Balm,Nivea,,Rp30.000,No effects listed,https://example.com/5,https://example.com/5.jpg
";

    fn catalog() -> Catalog {
        Catalog::from_csv_reader(SAMPLE_CSV.as_bytes(), &EffectNormalizer::builtin()).unwrap()
    }

    #[test]
    fn test_score_counts_shared_effects_and_ranks() {
        let catalog = catalog();
        let results = recommend(&catalog, "jerawat", &RecommendQuery::default());

        // Two matches: the 2-effect product ranks above the 1-effect one.
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].product.name, "Acne Duo Serum");
        assert_eq!(results[0].match_score, 2);
        assert_eq!(results[1].product.name, "Cetaphil Gentle Cleanser");
        assert_eq!(results[1].match_score, 1);
    }

    #[test]
    fn test_non_matching_products_excluded() {
        let catalog = catalog();
        let results = recommend(&catalog, "jerawat", &RecommendQuery::default());
        assert!(results.iter().all(|r| r.match_score > 0));
        assert!(!results.iter().any(|r| r.product.name == "Plain Balm"));
    }

    #[test]
    fn test_unknown_problem_yields_empty() {
        let catalog = catalog();
        assert!(recommend(&catalog, "unknown_problem", &RecommendQuery::default()).is_empty());
        assert!(recommend(&catalog, "", &RecommendQuery::default()).is_empty());
    }

    #[test]
    fn test_problem_lookup_case_insensitive() {
        let catalog = catalog();
        let results = recommend(&catalog, "JERAWAT", &RecommendQuery::default());
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_intersects_with_problem_filter() {
        let catalog = catalog();
        let query = RecommendQuery {
            search: Some("cetaphil".to_string()),
            ..Default::default()
        };
        let results = recommend(&catalog, "jerawat", &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.name, "Cetaphil Gentle Cleanser");

        // Search hit outside the problem filter stays excluded.
        let query = RecommendQuery {
            search: Some("Brightening".to_string()),
            ..Default::default()
        };
        assert!(recommend(&catalog, "jerawat", &query).is_empty());
    }

    #[test]
    fn test_search_whitespace_is_significant() {
        let catalog = catalog();

        // Trailing space is part of the needle; "cleanser " is not a
        // substring of "Cetaphil Gentle Cleanser".
        let query = RecommendQuery {
            search: Some("cleanser ".to_string()),
            ..Default::default()
        };
        assert!(recommend(&catalog, "jerawat", &query).is_empty());

        // An inner space must match literally.
        let query = RecommendQuery {
            search: Some("gentle cleanser".to_string()),
            ..Default::default()
        };
        assert_eq!(recommend(&catalog, "jerawat", &query).len(), 1);

        // A whitespace-only query is non-empty and filters: no product
        // name here contains a double space.
        let query = RecommendQuery {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(recommend(&catalog, "jerawat", &query).is_empty());

        // A single space matches any multi-word name.
        let query = RecommendQuery {
            search: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(recommend(&catalog, "jerawat", &query).len(), 2);
    }

    #[test]
    fn test_top_n_zero_yields_empty() {
        let catalog = catalog();
        let query = RecommendQuery { top_n: 0, ..Default::default() };
        assert!(recommend(&catalog, "jerawat", &query).is_empty());
    }

    #[test]
    fn test_top_n_truncates_after_sorting() {
        let catalog = catalog();
        let query = RecommendQuery { top_n: 1, ..Default::default() };
        let results = recommend(&catalog, "jerawat", &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 2);
    }

    #[test]
    fn test_top_n_larger_than_matches_yields_all() {
        let catalog = catalog();
        let query = RecommendQuery { top_n: 500, ..Default::default() };
        assert_eq!(recommend(&catalog, "jerawat", &query).len(), 2);
    }

    #[test]
    fn test_sort_by_name() {
        let catalog = catalog();
        let query = RecommendQuery { sort: SortOrder::Name, ..Default::default() };
        let results = recommend(&catalog, "jerawat", &query);
        assert_eq!(results[0].product.name, "Acne Duo Serum");
        assert_eq!(results[1].product.name, "Cetaphil Gentle Cleanser");
    }

    #[test]
    fn test_sort_by_brand() {
        let catalog = catalog();
        let query = RecommendQuery { sort: SortOrder::Brand, ..Default::default() };
        let results = recommend(&catalog, "jerawat", &query);
        assert_eq!(results[0].product.brand, "Cetaphil");
        assert_eq!(results[1].product.brand, "Somethinc");
    }

    #[test]
    fn test_sort_by_price_ascending_numeric() {
        let catalog = catalog();
        let query = RecommendQuery { sort: SortOrder::Price, ..Default::default() };
        let results = recommend(&catalog, "jerawat", &query);
        // Rp120.000 (120000) before Rp150.000 (150000).
        assert_eq!(results[0].product.price, "Rp120.000");
        assert_eq!(results[1].product.price, "Rp150.000");
    }

    #[test]
    fn test_digit_free_price_sorts_last() {
        let catalog = catalog();
        let query = RecommendQuery { sort: SortOrder::Price, ..Default::default() };
        // "produksi_minyak_berlebih" matches only the toner priced "gratis".
        let results = recommend(&catalog, "produksi_minyak_berlebih", &query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.price, "gratis");

        // Mixed case: parsable prices come first.
        let csv = "\
product_name,brand,notable_effects,price,description,product_href,picture_src
Free Sample,A,soothing,harga hubungi kami,x,u,v
Cheap One,B,soothing,Rp85.000,x,u,v
Pricey One,C,soothing,Rp120.000,x,u,v
";
        let catalog =
            Catalog::from_csv_reader(csv.as_bytes(), &EffectNormalizer::builtin()).unwrap();
        let results = recommend(&catalog, "jerawat", &query);
        let prices: Vec<&str> = results.iter().map(|r| r.product.price.as_str()).collect();
        assert_eq!(prices, vec!["Rp85.000", "Rp120.000", "harga hubungi kami"]);
    }

    #[test]
    fn test_duplicate_effects_count_once() {
        let csv = "\
product_name,brand,notable_effects,price,description,product_href,picture_src
Echo Serum,A,\"soothing, soothing, soothing\",Rp10.000,x,u,v
";
        let catalog =
            Catalog::from_csv_reader(csv.as_bytes(), &EffectNormalizer::builtin()).unwrap();
        let results = recommend(&catalog, "jerawat", &RecommendQuery::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 1);
    }

    #[test]
    fn test_effect_matching_is_order_independent() {
        let a = "\
product_name,brand,notable_effects,price,description,product_href,picture_src
P,A,\"anti-acne, soothing\",Rp1,x,u,v
";
        let b = "\
product_name,brand,notable_effects,price,description,product_href,picture_src
P,A,\"soothing, anti-acne\",Rp1,x,u,v
";
        let normalizer = EffectNormalizer::builtin();
        let ca = Catalog::from_csv_reader(a.as_bytes(), &normalizer).unwrap();
        let cb = Catalog::from_csv_reader(b.as_bytes(), &normalizer).unwrap();
        let sa = recommend(&ca, "jerawat", &RecommendQuery::default())[0].match_score;
        let sb = recommend(&cb, "jerawat", &RecommendQuery::default())[0].match_score;
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("Rp150.000"), Some(150_000));
        assert_eq!(parse_price("Rp85.000"), Some(85_000));
        assert_eq!(parse_price("12,500 IDR"), Some(12_500));
        assert_eq!(parse_price("gratis"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_relevance_ties_keep_catalog_order() {
        let csv = "\
product_name,brand,notable_effects,price,description,product_href,picture_src
First,A,soothing,Rp1,x,u,v
Second,B,soothing,Rp2,x,u,v
";
        let catalog =
            Catalog::from_csv_reader(csv.as_bytes(), &EffectNormalizer::builtin()).unwrap();
        let results = recommend(&catalog, "jerawat", &RecommendQuery::default());
        assert_eq!(results[0].product.name, "First");
        assert_eq!(results[1].product.name, "Second");
    }
}
