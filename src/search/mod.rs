// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: where the rubber meets the road.
//!
//! Tokenize the query, expand every term against the vocabulary, score the
//! postings with field-weighted BM25, and keep only documents that matched
//! every query term. Filters run before truncation, so `limit` counts
//! results the caller actually wants.

pub mod expand;

use tracing::debug;

use crate::catalog::category_label;
use crate::index::{DocEntry, SearchIndex};
use crate::scoring::ranking::{rank, ScoredDoc};
use crate::scoring::{bm25_tf, field_weight, idf};
use crate::tokenize::tokenize;
use crate::types::{DocId, SearchOptions, SearchResult, Skill, SkillMap};

pub use expand::{expand_term, Expansion};

/// Tokenized query with duplicates removed, first occurrence kept.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in tokenize(query) {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Does a stored category match the requested one?
///
/// Callers may pass the slug (`"ui"`) or the label (`"UI & Design"`).
fn category_matches(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|slug| slug == wanted || category_label(slug) == Some(wanted))
}

fn lookup<'a>(skills: Option<&'a SkillMap>, name: &str) -> Option<&'a Skill> {
    skills.and_then(|m| m.get(name))
}

fn passes_filters(doc: &DocEntry, category: Option<&str>, options: &SearchOptions) -> bool {
    if options.skill_type.is_some_and(|t| t != doc.skill_type) {
        return false;
    }
    if options.source.is_some_and(|s| s != doc.source) {
        return false;
    }
    match options.category.as_deref() {
        Some(wanted) => category_matches(category, wanted),
        None => true,
    }
}

/// Score every document against the query. Index `i` holds doc `i`'s total;
/// documents that missed any query term are `None`.
///
/// All expansions of one query term share that term's idf, computed from the
/// number of documents any of them reaches. A rare expansion therefore never
/// outweighs a common exact match.
fn score_documents(index: &SearchIndex, terms: &[String]) -> Vec<Option<f64>> {
    let n_docs = index.doc_count();
    let avg = index.avg_doc_length();
    let mut scores = vec![0.0f64; n_docs];
    let mut terms_hit = vec![0usize; n_docs];
    let mut hit_this_term = vec![false; n_docs];

    for term in terms {
        let expansions = expand_term(index, term);

        hit_this_term.iter_mut().for_each(|h| *h = false);
        let mut term_df = 0;
        for expansion in &expansions {
            for posting in index.postings(expansion.term) {
                let doc = posting.doc.as_usize();
                if !hit_this_term[doc] {
                    hit_this_term[doc] = true;
                    terms_hit[doc] += 1;
                    term_df += 1;
                }
            }
        }

        let term_idf = idf(n_docs, term_df);
        for Expansion { term: expanded, weight } in expansions {
            for posting in index.postings(expanded) {
                let doc = posting.doc.as_usize();
                let doc_len = index.docs[doc].length;
                scores[doc] += term_idf
                    * bm25_tf(posting.tf, doc_len, avg)
                    * field_weight(posting.field)
                    * weight;
            }
        }
    }

    scores
        .into_iter()
        .zip(terms_hit)
        .map(|(score, hits)| (hits == terms.len()).then_some(score))
        .collect()
}

/// Ranked search over the index.
///
/// `skills` is an optional fallback for metadata the index did not store
/// (a missing category or description). An empty or all-stopword query
/// returns nothing.
///
/// ```
/// use skillsearch::{build_index, search, SearchOptions};
/// use skillsearch::testing::sample_library;
///
/// let index = build_index(&sample_library());
/// let hits = search(&index, "swift concurrency", &SearchOptions::default(), None);
/// assert_eq!(hits[0].name, "swift-concurrency");
/// assert!(search(&index, "the of and", &SearchOptions::default(), None).is_empty());
/// ```
pub fn search(
    index: &SearchIndex,
    query: &str,
    options: &SearchOptions,
    skills: Option<&SkillMap>,
) -> Vec<SearchResult> {
    let terms = query_terms(query);
    if terms.is_empty() || options.limit == 0 || index.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<ScoredDoc> = score_documents(index, &terms)
        .into_iter()
        .enumerate()
        .filter_map(|(i, score)| {
            let score = score?;
            let doc = &index.docs[i];
            let category = doc
                .category
                .as_deref()
                .or_else(|| lookup(skills, &doc.name).and_then(|s| s.category.as_deref()));
            passes_filters(doc, category, options).then_some(ScoredDoc {
                doc: DocId(i as u32),
                score,
            })
        })
        .collect();

    rank(&mut candidates);
    candidates.truncate(options.limit);

    debug!(
        query,
        terms = terms.len(),
        results = candidates.len(),
        "search complete"
    );

    candidates
        .into_iter()
        .map(|hit| {
            let doc = &index.docs[hit.doc.as_usize()];
            let skill = lookup(skills, &doc.name);
            let description = if doc.description.is_empty() {
                skill.map(|s| s.description.clone()).unwrap_or_default()
            } else {
                doc.description.clone()
            };
            SearchResult {
                name: doc.name.clone(),
                score: hit.score,
                skill_type: doc.skill_type,
                source: doc.source,
                category: doc
                    .category
                    .clone()
                    .or_else(|| skill.and_then(|s| s.category.clone())),
                description,
                matching_sections: doc.matching_sections(&terms),
            }
        })
        .collect()
}
