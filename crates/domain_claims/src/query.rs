//! Claims table pipeline: filter, sort, paginate
//!
//! [`transform`] is the only place claim lists are narrowed, ordered and
//! windowed. Views call it with the full collection and render whatever it
//! returns.
//!
//! # Ordering
//!
//! Rows compare on the selected field first. Equal keys fall back to claim id
//! ascending (independent of direction), and rows that are still equal keep
//! their input order because the sort is stable.
//!
//! # Paging
//!
//! Pages are 1-based. A page past the end (or page 0) yields an empty window,
//! not an error; callers that want to stay in range use
//! [`PageRequest::clamp_to`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::risk::RiskTier;

/// Rows per page in every list view
pub const PAGE_SIZE: usize = 15;

/// Conjunctive filter criteria; `None` means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFilter {
    pub risk_tier: Option<RiskTier>,
    pub status: Option<ClaimStatus>,
    pub search: Option<String>,
}

impl ClaimFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk_tier(mut self, tier: RiskTier) -> Self {
        self.risk_tier = Some(tier);
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the search term; an empty term clears it
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = non_empty(term.into());
        self
    }

    /// Returns true if no criterion is active
    pub fn is_empty(&self) -> bool {
        self.risk_tier.is_none() && self.status.is_none() && self.search.is_none()
    }

    /// Returns true if the claim satisfies every active criterion
    pub fn matches(&self, claim: &Claim) -> bool {
        self.matcher().matches(claim)
    }

    /// Merges a partial update into this filter
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(tier) = patch.risk_tier {
            self.risk_tier = tier;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(search) = patch.search {
            self.search = search.and_then(non_empty);
        }
    }

    fn matcher(&self) -> FilterMatcher<'_> {
        FilterMatcher {
            filter: self,
            needle: self.search.as_ref().map(|s| s.to_lowercase()),
        }
    }
}

/// Lowercases the search term once for a whole pass
struct FilterMatcher<'a> {
    filter: &'a ClaimFilter,
    needle: Option<String>,
}

impl FilterMatcher<'_> {
    fn matches(&self, claim: &Claim) -> bool {
        if let Some(tier) = self.filter.risk_tier {
            if claim.risk_tier() != tier {
                return false;
            }
        }
        if let Some(status) = self.filter.status {
            if claim.status != status {
                return false;
            }
        }
        match &self.needle {
            Some(needle) => claim.matches_search(needle),
            None => true,
        }
    }
}

fn non_empty(term: String) -> Option<String> {
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}

/// Partial filter update
///
/// Outer `None` leaves a criterion untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub risk_tier: Option<Option<RiskTier>>,
    pub status: Option<Option<ClaimStatus>>,
    pub search: Option<Option<String>>,
}

impl FilterPatch {
    /// Clears every criterion
    pub fn clear_all() -> Self {
        Self {
            risk_tier: Some(None),
            status: Some(None),
            search: Some(None),
        }
    }
}

/// Sortable claim columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    ClaimDate,
    Amount,
    FraudScore,
    RiskTier,
    Status,
    PatientId,
    ProviderId,
    Diagnosis,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ClaimDate => "claim_date",
            SortField::Amount => "amount",
            SortField::FraudScore => "fraud_score",
            SortField::RiskTier => "risk_tier",
            SortField::Status => "status",
            SortField::PatientId => "patient_id",
            SortField::ProviderId => "provider_id",
            SortField::Diagnosis => "diagnosis",
        }
    }

    fn compare(&self, a: &Claim, b: &Claim) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::ClaimDate => a.claim_date.cmp(&b.claim_date),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::FraudScore => a.fraud_score.total_cmp(&b.fraud_score),
            SortField::RiskTier => a.risk_tier().cmp(&b.risk_tier()),
            SortField::Status => a.status.cmp(&b.status),
            SortField::PatientId => a.patient_id.cmp(&b.patient_id),
            SortField::ProviderId => a.provider_id.cmp(&b.provider_id),
            SortField::Diagnosis => a.diagnosis_code.cmp(&b.diagnosis_code),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ClaimError;

    /// Accepts snake_case and the camelCase column keys used by the dashboard
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "claim_date" | "claimDate" => Ok(SortField::ClaimDate),
            "amount" => Ok(SortField::Amount),
            "fraud_score" | "fraudScore" => Ok(SortField::FraudScore),
            "risk_tier" | "riskLevel" | "risk_level" => Ok(SortField::RiskTier),
            "status" => Ok(SortField::Status),
            "patient_id" | "patientId" => Ok(SortField::PatientId),
            "provider_id" | "providerId" => Ok(SortField::ProviderId),
            "diagnosis" | "diagnosis_code" | "diagnosisCode" => Ok(SortField::Diagnosis),
            other => Err(ClaimError::InvalidSortField(other.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ClaimError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// Sort key plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest claims first
    fn default() -> Self {
        Self {
            field: SortField::ClaimDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Column-header click: same field flips direction, new field starts ascending
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.toggle())
        } else {
            Self::asc(field)
        }
    }

    /// Full comparison including the id tie-break
    pub fn compare(&self, a: &Claim, b: &Claim) -> Ordering {
        let primary = self.field.compare(a, b);
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// 1-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl PageRequest {
    /// Page `page` with the standard page size
    pub fn new(page: usize) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
        }
    }

    pub fn first() -> Self {
        Self::new(1)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Moves the page into `1..=max(total_pages, 1)`
    pub fn clamp_to(self, total_pages: usize) -> Self {
        Self {
            page: self.page.clamp(1, total_pages.max(1)),
            page_size: self.page_size,
        }
    }

    /// Index range of this page within `len` items; empty when out of range
    pub fn window(&self, len: usize) -> Range<usize> {
        if self.page == 0 || self.page_size == 0 {
            return 0..0;
        }
        let start = (self.page - 1).saturating_mul(self.page_size);
        if start >= len {
            return 0..0;
        }
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }
}

/// `ceil(count / page_size)`; zero items means zero pages
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Output of the claims pipeline
pub type ClaimPage = Page<Claim>;

/// Slices a page out of an already ordered collection
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    Page {
        items: items[request.window(items.len())].to_vec(),
        page: request.page,
        page_size: request.page_size,
        total_items: items.len(),
        total_pages: total_pages(items.len(), request.page_size),
    }
}

/// Claims satisfying every active criterion, in input order
pub fn filter_claims<'a>(claims: &'a [Claim], filter: &ClaimFilter) -> Vec<&'a Claim> {
    let matcher = filter.matcher();
    claims.iter().filter(|c| matcher.matches(c)).collect()
}

/// Stable in-place sort
pub fn sort_claims(rows: &mut [&Claim], sort: &SortSpec) {
    rows.sort_by(|a, b| sort.compare(a, b));
}

/// Produces the visible page of rows for a claims table
///
/// Pure function of its inputs.
pub fn transform(
    claims: &[Claim],
    filter: &ClaimFilter,
    sort: &SortSpec,
    page: PageRequest,
) -> ClaimPage {
    let mut rows = filter_claims(claims, filter);
    sort_claims(&mut rows, sort);

    let matched = rows.len();
    let items = rows[page.window(matched)]
        .iter()
        .map(|claim| (*claim).clone())
        .collect();

    tracing::trace!(
        total = claims.len(),
        matched,
        page = page.page,
        sort = %sort.field,
        "Transformed claims table"
    );

    Page {
        items,
        page: page.page,
        page_size: page.page_size,
        total_items: matched,
        total_pages: total_pages(matched, page.page_size),
    }
}
