//! Explicit view state for the rendered document
//!
//! Each highlighted sentence is either collapsed or expanded, and separately
//! hovered or not. Expanding a sentence that mentions organizations asks the
//! caller to load their market data; until the results arrive every
//! organization shows a loading placeholder.

use crate::model::{EnrichedOrganization, OrganizationMention, Segment};
use crate::{Error, Result};
use serde::Serialize;

/// User interaction with a single highlighted sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEvent {
    Click,
    HoverEnter,
    HoverLeave,
}

/// Display flags of one highlighted sentence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SegmentView {
    pub expanded: bool,
    pub hovered: bool,
}

impl SegmentView {
    /// Next state after `event`
    pub fn apply(self, event: SegmentEvent) -> Self {
        match event {
            SegmentEvent::Click => Self {
                expanded: !self.expanded,
                ..self
            },
            SegmentEvent::HoverEnter => Self {
                hovered: true,
                ..self
            },
            SegmentEvent::HoverLeave => Self {
                hovered: false,
                ..self
            },
        }
    }

    /// Extra CSS class for the hover state
    pub fn hover_class(&self) -> &'static str {
        if self.hovered { "hover" } else { "" }
    }
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Enrich these organizations and hand the results to [`PageView::resolve`]
    LoadOrganizations {
        segment: usize,
        mentions: Vec<OrganizationMention>,
    },
}

/// Load state of one organization's info box
#[derive(Debug, Clone, PartialEq)]
pub enum OrganizationView {
    Loading,
    Loaded(EnrichedOrganization),
    Failed(String),
}

/// A segment with its display state
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEntry {
    pub segment: Segment,
    pub view: SegmentView,
    /// One entry per organization of the segment, same order; empty until
    /// the first expansion requests the data
    pub organizations: Vec<OrganizationView>,
}

impl SegmentEntry {
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            view: SegmentView::default(),
            organizations: Vec::new(),
        }
    }

    fn requested(&self) -> bool {
        !self.organizations.is_empty()
    }
}

/// Whole-document state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PageView {
    /// Text submitted, segments not back yet
    #[default]
    Uploading,
    Ready(Vec<SegmentEntry>),
    Failed(String),
}

impl PageView {
    pub fn ready(segments: Vec<Segment>) -> Self {
        Self::Ready(segments.into_iter().map(SegmentEntry::new).collect())
    }

    /// State after the segmentation stage finished
    pub fn from_result(result: Result<Vec<Segment>>) -> Self {
        match result {
            Ok(segments) => Self::ready(segments),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn entries(&self) -> &[SegmentEntry] {
        match self {
            Self::Ready(entries) => entries,
            _ => &[],
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut SegmentEntry> {
        let Self::Ready(entries) = self else {
            return Err(Error::InvalidSentence("document is not ready".to_string()));
        };
        let count = entries.len();
        entries.get_mut(index).ok_or_else(|| {
            Error::InvalidSentence(format!("no sentence {index} (document has {count})"))
        })
    }

    /// Apply `event` to the segment at `index`
    ///
    /// The first expansion of a segment with organizations marks them as
    /// loading and returns [`Effect::LoadOrganizations`]. Later expansions
    /// reuse whatever was loaded.
    pub fn dispatch(&mut self, index: usize, event: SegmentEvent) -> Result<Option<Effect>> {
        let entry = self.entry_mut(index)?;
        let before = entry.view;
        entry.view = before.apply(event);

        let expanding = entry.view.expanded && !before.expanded;
        if !expanding || entry.segment.organizations.is_empty() || entry.requested() {
            return Ok(None);
        }

        entry.organizations = vec![OrganizationView::Loading; entry.segment.organizations.len()];
        Ok(Some(Effect::LoadOrganizations {
            segment: index,
            mentions: entry.segment.organizations.clone(),
        }))
    }

    /// Store enrichment results for the segment at `index`
    ///
    /// `results` must line up with the segment's organizations.
    pub fn resolve(
        &mut self,
        index: usize,
        results: Vec<Result<EnrichedOrganization>>,
    ) -> Result<()> {
        let entry = self.entry_mut(index)?;
        if results.len() != entry.segment.organizations.len() {
            return Err(Error::Render(format!(
                "expected {} organization results for sentence {index}, got {}",
                entry.segment.organizations.len(),
                results.len()
            )));
        }

        entry.organizations = results
            .into_iter()
            .map(|result| match result {
                Ok(org) => OrganizationView::Loaded(org),
                Err(e) => OrganizationView::Failed(e.to_string()),
            })
            .collect();
        Ok(())
    }
}
