use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StepStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Todo,
    InProgress,
    Complete,
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Todo => "To Do",
            StepStatus::InProgress => "In Progress",
            StepStatus::Complete => "Complete",
        }
    }

    /// Sort rank within equal completion state: in-progress rows surface
    /// above untouched ones.
    pub fn rank(&self) -> u8 {
        match self {
            StepStatus::InProgress => 0,
            StepStatus::Todo => 1,
            StepStatus::Complete => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// StepKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Input,
    Execution,
    Validation,
    /// Values are computed live from the financial plan, never entered.
    Smart,
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One labelled text field on a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(key: &str, label: &str, value: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single unit of a guided form-filling workflow: business-plan steps,
/// pitch-deck slides and funding-application steps all share this shape.
/// `phase` is the grouping label ("Brand Identity", "Slide 3", "Step 2").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub phase: String,
    pub title: String,
    pub kind: StepKind,
    pub status: StepStatus,
    pub fields: Vec<Field>,
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub initials: String,
}

// ---------------------------------------------------------------------------
// Projects & tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectPhase {
    Active,
    PostPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub phase: ProjectPhase,
    pub unlock_condition: Option<String>,
    /// Owner is a non-owning reference into the team list; lookups may miss.
    pub owner: Option<String>,
    pub tasks: u32,
    pub completed_tasks: u32,
    pub notifications: u32,
}

impl Project {
    pub fn is_locked(&self) -> bool {
        self.phase == ProjectPhase::PostPlan
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTask {
    pub id: String,
    pub title: String,
    pub kind: StepKind,
    pub status: StepStatus,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub notifications: u32,
}

// ---------------------------------------------------------------------------
// Funding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingType {
    Grant,
    Loan,
    Scholarship,
}

impl FundingType {
    pub fn label(&self) -> &'static str {
        match self {
            FundingType::Grant => "Grant",
            FundingType::Loan => "Loan",
            FundingType::Scholarship => "Scholarship",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingOpportunity {
    pub id: String,
    pub name: String,
    pub kind: FundingType,
    pub amount: String,
    /// 0-100 heuristic compatibility rating, used for sorting and display.
    pub match_score: u8,
    pub deadline: String,
    pub requirements: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingProject {
    pub id: String,
    pub name: String,
    pub kind: FundingType,
    pub amount: String,
    pub deadline: String,
    pub status: StepStatus,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub notifications: u32,
}

// ---------------------------------------------------------------------------
// Financial plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthProjection {
    pub month: u32,
    pub revenue: i64,
    pub expenses: i64,
    pub net: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionPeriod {
    pub label: String,
    pub months: Vec<MonthProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialPlan {
    pub estimated_budget: i64,
    pub break_even_month: u32,
    pub periods: Vec<ProjectionPeriod>,
    pub assumptions: Vec<Assumption>,
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    Estimated,
    InProgress,
    Confirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub budgeted: i64,
    pub actual: i64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetData {
    pub startup_costs: Vec<BudgetLine>,
    pub monthly_fixed: Vec<BudgetLine>,
}

impl BudgetData {
    pub fn monthly_fixed_total(&self) -> i64 {
        self.monthly_fixed.iter().map(|l| l.budgeted).sum()
    }

    pub fn startup_total(&self) -> i64 {
        self.startup_costs.iter().map(|l| l.budgeted).sum()
    }
}

// ---------------------------------------------------------------------------
// Finance entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    pub amount: f64,
    pub project: String,
    pub reason: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub id: String,
    pub amount: f64,
    pub source: String,
    pub note: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceSeed {
    pub budget_required: i64,
    pub budget_available: i64,
    pub expenses: Vec<ExpenseEntry>,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueSeed {
    pub sources: Vec<String>,
    pub entries: Vec<RevenueEntry>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Assistant,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatQuestion {
    pub prompt: String,
    pub options: Vec<String>,
}

/// One message in the scripted funding conversation. The sequence is
/// append-only and never truncated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub context_note: Option<String>,
    pub question: Option<ChatQuestion>,
    pub date_label: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: entry_id("user"),
            role: ChatRole::User,
            text: text.into(),
            context_note: None,
            question: None,
            date_label: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: entry_id("asst"),
            role: ChatRole::Assistant,
            text: text.into(),
            context_note: None,
            question: None,
            date_label: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Experts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub title: String,
    pub rating: f32,
    pub reviews: u32,
    pub specialties: Vec<String>,
    pub bio: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotGroup {
    pub id: String,
    pub day: String,
    pub times: Vec<String>,
}

// ---------------------------------------------------------------------------
// Business profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub location: String,
}

// ---------------------------------------------------------------------------
// Id generation
// ---------------------------------------------------------------------------

static ENTRY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a timestamp-derived id with a sequence suffix so that entries
/// created within the same millisecond stay unique.
pub fn entry_id(prefix: &str) -> String {
    let seq = ENTRY_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), seq)
}
