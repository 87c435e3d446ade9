//! Output formats for the `analyze` subcommand

use anyhow::{Result, bail};
use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use lens_core::{
    EnrichedOrganization, OrganizationMention, OrganizationView, PageView, Sentence,
};
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

/// Which sentences to expand before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expand {
    None,
    All,
    Indices(Vec<usize>),
}

impl FromStr for Expand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            list => {
                let mut indices = Vec::new();
                for part in list.split(',') {
                    let Ok(index) = part.trim().parse::<usize>() else {
                        bail!("'{part}' is not a sentence number");
                    };
                    indices.push(index);
                }
                Ok(Self::Indices(indices))
            },
        }
    }
}

impl Expand {
    /// Sentence numbers to click, given the page
    ///
    /// A click toggles, so sentences that are already expanded and repeated
    /// numbers are left out. A page that never became ready has nothing to
    /// expand. Numbers past the end are kept so the click reports them.
    pub fn targets(&self, page: &PageView) -> Vec<usize> {
        if !matches!(page, PageView::Ready(_)) {
            return Vec::new();
        }
        let entries = page.entries();
        let collapsed = |index: &usize| entries.get(*index).is_none_or(|e| !e.view.expanded);

        match self {
            Self::None => Vec::new(),
            Self::All => entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| !entry.segment.organizations.is_empty())
                .map(|(index, _)| index)
                .filter(collapsed)
                .collect(),
            Self::Indices(indices) => {
                let mut seen = HashSet::new();
                indices
                    .iter()
                    .copied()
                    .filter(|index| seen.insert(*index))
                    .filter(collapsed)
                    .collect()
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
enum OrganizationReport<'a> {
    Pending {
        mention: &'a OrganizationMention,
    },
    Loaded {
        #[serde(flatten)]
        organization: &'a EnrichedOrganization,
    },
    Failed {
        mention: &'a OrganizationMention,
        error: &'a str,
    },
}

#[derive(Debug, Serialize)]
struct SegmentReport<'a> {
    sentence: &'a Sentence,
    expanded: bool,
    organizations: Vec<OrganizationReport<'a>>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    segments: Vec<SegmentReport<'a>>,
}

/// Serialize the page, one record per sentence
pub fn render_json(page: &PageView) -> Result<String> {
    let segments = page
        .entries()
        .iter()
        .map(|entry| {
            let organizations = entry
                .segment
                .organizations
                .iter()
                .enumerate()
                .map(|(i, mention)| match entry.organizations.get(i) {
                    Some(OrganizationView::Loaded(organization)) => {
                        OrganizationReport::Loaded { organization }
                    },
                    Some(OrganizationView::Failed(error)) => OrganizationReport::Failed {
                        mention,
                        error: error.as_str(),
                    },
                    Some(OrganizationView::Loading) | None => {
                        OrganizationReport::Pending { mention }
                    },
                })
                .collect();
            SegmentReport {
                sentence: &entry.segment.sentence,
                expanded: entry.view.expanded,
                organizations,
            }
        })
        .collect();

    let report = Report {
        error: match page {
            PageView::Failed(msg) => Some(msg.as_str()),
            _ => None,
        },
        segments,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Table of every organization with market data, or `None` when nothing loaded
pub fn organization_table(page: &PageView) -> Option<Table> {
    let loaded: Vec<&EnrichedOrganization> = page
        .entries()
        .iter()
        .flat_map(|entry| entry.organizations.iter())
        .filter_map(|view| match view {
            OrganizationView::Loaded(org) if org.is_resolved() => Some(org),
            _ => None,
        })
        .collect();

    if loaded.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Organization",
            "Symbol",
            "Price",
            "P/E",
            "FCF (annual)",
            "Rating",
            "Reddit mentions",
        ]);

    for org in loaded {
        let fundamentals = org.fundamentals.unwrap_or_default();
        let rating = org
            .recommendation
            .map(|r| format!("{} ({})", r.label, r.count))
            .unwrap_or_default();
        table.add_row(vec![
            org.mention.name.clone(),
            org.symbol.clone(),
            org.quote
                .as_ref()
                .map(|q| format!("{:.2}", q.current))
                .unwrap_or_else(|| "-".to_string()),
            format!("{:.2}", fundamentals.pe_ratio),
            format!("{:.2}", fundamentals.free_cash_flow_annual),
            rating,
            org.social
                .as_ref()
                .map(|s| s.mention.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::{Fundamentals, Quote, Segment, SegmentEvent, Sentiment};

    fn page() -> PageView {
        PageView::ready(vec![
            Segment {
                sentence: Sentence::new("Microsoft and Google rose.", Sentiment::Positive, 0, 26),
                organizations: vec![
                    OrganizationMention::new("Microsoft", 0),
                    OrganizationMention::new("Google", 14),
                ],
            },
            Segment {
                sentence: Sentence::new("Nothing else.", Sentiment::Neutral, 27, 13),
                organizations: vec![],
            },
        ])
    }

    fn loaded_page() -> PageView {
        let mut page = page();
        page.dispatch(0, SegmentEvent::Click).unwrap();
        let mut msft = EnrichedOrganization::unresolved(OrganizationMention::new("Microsoft", 0));
        msft.symbol = "MSFT".to_string();
        msft.quote = Some(Quote::with_price(289.67));
        msft.fundamentals = Some(Fundamentals::default());
        page.resolve(
            0,
            vec![
                Ok(msft),
                Err(lens_core::Error::Upstream("down".to_string())),
            ],
        )
        .unwrap();
        page
    }

    #[test]
    fn test_parse_expand() {
        assert_eq!("all".parse::<Expand>().unwrap(), Expand::All);
        assert_eq!("none".parse::<Expand>().unwrap(), Expand::None);
        assert_eq!(
            "0, 2".parse::<Expand>().unwrap(),
            Expand::Indices(vec![0, 2])
        );
        assert!("one".parse::<Expand>().is_err());
    }

    #[test]
    fn test_expand_all_targets_sentences_with_orgs() {
        assert_eq!(Expand::All.targets(&page()), vec![0]);
        assert!(Expand::None.targets(&page()).is_empty());
    }

    #[test]
    fn test_repeated_index_expands_once() {
        let mut page = page();
        let targets = "0,0".parse::<Expand>().unwrap().targets(&page);
        assert_eq!(targets, vec![0]);

        for index in targets {
            page.dispatch(index, SegmentEvent::Click).unwrap();
        }
        assert!(page.entries()[0].view.expanded);
    }

    #[test]
    fn test_expanded_sentences_not_clicked_again() {
        let mut page = page();
        page.dispatch(0, SegmentEvent::Click).unwrap();

        assert!(Expand::All.targets(&page).is_empty());
        assert_eq!(Expand::Indices(vec![0, 1]).targets(&page), vec![1]);
    }

    #[test]
    fn test_failed_page_has_nothing_to_expand() {
        let page = PageView::Failed("Upstream request failed: HTTP 401".to_string());
        assert!("0".parse::<Expand>().unwrap().targets(&page).is_empty());
        assert!(Expand::All.targets(&page).is_empty());

        let json: serde_json::Value = serde_json::from_str(&render_json(&page).unwrap()).unwrap();
        assert_eq!(json["error"], "Upstream request failed: HTTP 401");
    }

    #[test]
    fn test_out_of_range_index_is_kept_for_reporting() {
        let mut page = page();
        assert_eq!(Expand::Indices(vec![7]).targets(&page), vec![7]);
        assert!(matches!(
            page.dispatch(7, SegmentEvent::Click),
            Err(lens_core::Error::InvalidSentence(_))
        ));
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&loaded_page()).unwrap()).unwrap();
        let orgs = &json["segments"][0]["organizations"];
        assert_eq!(orgs[0]["state"], "loaded");
        assert_eq!(orgs[0]["symbol"], "MSFT");
        assert_eq!(orgs[1]["state"], "failed");
        assert_eq!(json["segments"][1]["expanded"], false);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_json_pending_before_expansion() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&page()).unwrap()).unwrap();
        assert_eq!(json["segments"][0]["organizations"][0]["state"], "pending");
    }

    #[test]
    fn test_table_lists_resolved_only() {
        assert!(organization_table(&page()).is_none());

        let table = organization_table(&loaded_page()).unwrap().to_string();
        assert!(table.contains("MSFT"));
        assert!(table.contains("289.67"));
        assert!(!table.contains("Google"));
    }
}
