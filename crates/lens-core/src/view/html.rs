//! HTML rendering of a [`PageView`] via MiniJinja

use super::state::{OrganizationView, PageView, SegmentEntry};
use crate::Result;
use crate::model::EnrichedOrganization;
use minijinja::Environment;
use serde::Serialize;

const PAGE_TEMPLATE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ language }}">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
.container { max-width: 60em; margin: 2em auto; font-family: sans-serif; line-height: 1.6; }
.positive { background-color: #d4f5d4; }
.negative { background-color: #f8d0d0; }
.neutral { background-color: #f0f0f0; }
.mixed { background-color: #fbeec4; }
.hover { outline: 1px solid #888; cursor: pointer; }
.info-box { border: 1px solid #ccc; border-radius: 4px; margin: 0.5em 0; padding: 0.5em; background: #fff; }
.info-heading { font-size: 1.1em; margin: 0.4em 0; }
.error { color: #a00; }
</style>
</head>
<body>
<div class="container">
{%- if uploading %}
UPLOADING...
{%- elif error %}
<p class="error">{{ error }}</p>
{%- else %}
{%- for segment in segments %}
<span class="{{ segment.class }}" data-index="{{ loop.index0 }}">{{ segment.text }}<div class="info">
{%- for box in segment.boxes %}
<div class="info-box" data-key="{{ box.key }}">{{ box.name }}
{%- if box.state == "loading" %}
<p>Loading...</p>
{%- elif box.state == "failed" %}
<p class="error">{{ box.error }}</p>
{%- elif box.stock %}
<h2 class="info-heading">Stock Information:</h2>
<p>Stock: {{ box.stock.symbol }}</p>
<p>Current Price: {{ box.stock.price }}</p>
<p>Price to Earnings Ratio: {{ box.stock.pe_ratio }}</p>
<p>Free annual cash flow: {{ box.stock.free_cash_flow_annual }}</p>
<div>
<h2 class="info-heading">Sentiment and rating Information:</h2>
<p>Wall street rating: {{ box.stock.rating_text }} with {{ box.stock.rating }} recommendations</p>
{%- if box.stock.social %}
<p>At : {{ box.stock.social.at_time }} there were {{ box.stock.social.mention }} social media (Reddit) mentions</p>
{%- endif %}
</div>
{%- endif %}
</div>
{%- endfor %}
</div></span>
{%- endfor %}
{%- endif %}
</div>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'a str,
    language: &'a str,
    uploading: bool,
    error: Option<&'a str>,
    segments: Vec<SegmentContext<'a>>,
}

#[derive(Debug, Serialize)]
struct SegmentContext<'a> {
    text: &'a str,
    class: String,
    boxes: Vec<InfoBoxContext<'a>>,
}

#[derive(Debug, Serialize)]
struct InfoBoxContext<'a> {
    key: String,
    name: &'a str,
    state: &'static str,
    error: Option<&'a str>,
    stock: Option<StockContext<'a>>,
}

/// Display-ready values of a resolved organization
#[derive(Debug, Serialize)]
pub(crate) struct StockContext<'a> {
    pub symbol: &'a str,
    pub price: String,
    pub pe_ratio: f64,
    pub free_cash_flow_annual: f64,
    pub rating_text: &'static str,
    pub rating: u32,
    pub social: Option<SocialContext<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SocialContext<'a> {
    pub at_time: &'a str,
    pub mention: u64,
}

impl<'a> StockContext<'a> {
    /// `None` for organizations without a tradable symbol
    pub(crate) fn from_org(org: &'a EnrichedOrganization) -> Option<Self> {
        if !org.is_resolved() {
            return None;
        }

        let fundamentals = org.fundamentals.unwrap_or_default();
        let recommendation = org.recommendation.unwrap_or_else(crate::model::Recommendation::unknown);

        Some(Self {
            symbol: &org.symbol,
            price: org
                .quote
                .as_ref()
                .map(|q| q.current.to_string())
                .unwrap_or_default(),
            pe_ratio: fundamentals.pe_ratio,
            free_cash_flow_annual: fundamentals.free_cash_flow_annual,
            rating_text: recommendation.label.as_str(),
            rating: recommendation.count,
            social: org.social.as_ref().map(|s| SocialContext {
                at_time: &s.at_time,
                mention: s.mention,
            }),
        })
    }
}

/// Options for [`render_html`]
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub title: String,
    pub language: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "Thesis Lens".to_string(),
            language: "en".to_string(),
        }
    }
}

fn segment_context(entry: &SegmentEntry) -> SegmentContext<'_> {
    let sentence = &entry.segment.sentence;
    let class = format!("{} {}", sentence.sentiment, entry.view.hover_class())
        .trim_end()
        .to_string();

    let boxes = if entry.view.expanded {
        entry
            .segment
            .organizations
            .iter()
            .zip(&entry.organizations)
            .map(|(mention, state)| {
                let (state_name, error, stock) = match state {
                    OrganizationView::Loading => ("loading", None, None),
                    OrganizationView::Failed(msg) => ("failed", Some(msg.as_str()), None),
                    OrganizationView::Loaded(org) => ("loaded", None, StockContext::from_org(org)),
                };
                InfoBoxContext {
                    key: mention.key(),
                    name: &mention.name,
                    state: state_name,
                    error,
                    stock,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    SegmentContext {
        text: &sentence.text,
        class,
        boxes,
    }
}

/// Render the whole document as a standalone HTML page
pub fn render_html(page: &PageView, options: &HtmlOptions) -> Result<String> {
    let context = PageContext {
        title: &options.title,
        language: &options.language,
        uploading: matches!(page, PageView::Uploading),
        error: match page {
            PageView::Failed(msg) => Some(msg.as_str()),
            _ => None,
        },
        segments: page.entries().iter().map(segment_context).collect(),
    };

    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
    let html = env.get_template(PAGE_TEMPLATE_NAME)?.render(&context)?;
    Ok(html)
}
