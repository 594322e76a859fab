// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Built-in demo articles
//!
//! Two credible and two fabricated stories, each tagged with the verdict it
//! is meant to illustrate.

use crate::labels::Prediction;
use serde::Serialize;

/// A labelled demo article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleArticle {
    pub title: &'static str,
    pub text: &'static str,
    /// Outlet the article is attributed to
    pub outlet: &'static str,
    /// Verdict the article illustrates
    pub label: Prediction,
}

static SAMPLE_ARTICLES: [SampleArticle; 4] = [
    SampleArticle {
        title: "Climate Change Report Shows Rising Global Temperatures",
        text: "According to the latest IPCC report released today, global temperatures have risen by 1.1 degrees Celsius since pre-industrial times. The comprehensive study, conducted by over 200 scientists from 60 countries, provides evidence of accelerating climate change impacts worldwide. The report emphasizes the urgent need for immediate action to reduce greenhouse gas emissions.",
        outlet: "Reuters",
        label: Prediction::Real,
    },
    SampleArticle {
        title: "New Medical Breakthrough in Cancer Treatment",
        text: "Researchers at Johns Hopkins University have developed a promising new immunotherapy treatment for pancreatic cancer. The clinical trial, published in Nature Medicine, showed a 40% improvement in patient survival rates. Dr. Sarah Johnson, lead researcher, stated that this breakthrough could revolutionize cancer treatment protocols.",
        outlet: "Medical Journal",
        label: Prediction::Real,
    },
    SampleArticle {
        title: "Scientists Discover Aliens Living Underground",
        text: "Breaking: Government sources reveal that alien beings have been living in underground cities for decades. The shocking discovery was made by a team of 'researchers' who claim to have photographic evidence. However, no credible scientific institutions have verified these claims, and the photos appear to be digitally manipulated.",
        outlet: "Conspiracy News",
        label: Prediction::Fake,
    },
    SampleArticle {
        title: "Miracle Cure Eliminates All Diseases Overnight",
        text: "A revolutionary new pill discovered by a 'doctor' promises to cure all diseases within 24 hours. The amazing discovery has 'shocked' the medical community, though no peer-reviewed studies exist. Medical experts warn this is likely a scam targeting vulnerable people.",
        outlet: "Fake Health News",
        label: Prediction::Fake,
    },
];

pub fn sample_articles() -> &'static [SampleArticle] {
    &SAMPLE_ARTICLES
}

/// Articles illustrating one verdict
pub fn samples_labelled(label: Prediction) -> impl Iterator<Item = &'static SampleArticle> {
    SAMPLE_ARTICLES.iter().filter(move |article| article.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MIN_TEXT_CHARS;

    #[test]
    fn test_sample_split() {
        assert_eq!(sample_articles().len(), 4);
        assert_eq!(samples_labelled(Prediction::Real).count(), 2);
        assert_eq!(samples_labelled(Prediction::Fake).count(), 2);
    }

    #[test]
    fn test_samples_pass_text_validation() {
        for article in sample_articles() {
            assert!(article.text.chars().count() >= MIN_TEXT_CHARS);
            assert!(article.text.chars().count() > 100);
        }
    }
}
