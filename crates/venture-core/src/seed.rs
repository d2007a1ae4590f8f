//! Static sample data for the Ramen Shop demo.
//!
//! Every collection here is read-only seed: sections clone what they need
//! into their own local state at initialisation and never write back.

use std::collections::HashMap;

use crate::types::{
    Assumption, BudgetData, BudgetLine, BudgetStatus, BusinessProfile, ChatMessage, ChatQuestion,
    ChatRole, Expert, ExpenseEntry, Field, FinanceSeed, FinancialPlan, FundingOpportunity,
    FundingProject, FundingType, MonthProjection, Priority, Project, ProjectPhase, ProjectTask,
    ProjectionPeriod, RevenueSeed, Step, StepKind, StepStatus, TeamMember, TimeSlotGroup,
};

pub fn business_profile() -> BusinessProfile {
    BusinessProfile {
        name: "Ramen Shop".into(),
        location: "South Austin, TX".into(),
    }
}

pub fn team_members() -> Vec<TeamMember> {
    vec![
        TeamMember { id: "u-1".into(), name: "Sarah".into(), initials: "S".into() },
        TeamMember { id: "u-2".into(), name: "Mike".into(), initials: "M".into() },
        TeamMember { id: "u-3".into(), name: "You".into(), initials: "Y".into() },
    ]
}

// ---------------------------------------------------------------------------
// Business plan steps
// ---------------------------------------------------------------------------

fn step(
    id: &str,
    phase: &str,
    title: &str,
    kind: StepKind,
    status: StepStatus,
    fields: Vec<Field>,
) -> Step {
    Step {
        id: id.into(),
        phase: phase.into(),
        title: title.into(),
        kind,
        status,
        fields,
    }
}

pub fn plan_steps() -> Vec<Step> {
    vec![
        step(
            "pb-0",
            "Brand Identity",
            "Brand Identity",
            StepKind::Input,
            StepStatus::Complete,
            vec![
                Field::new("businessName", "Business Name", "Ramen Shop"),
                Field::new("location", "Location", "South Austin, TX"),
                Field::new("tagline", "Tagline / One-liner", ""),
            ],
        ),
        step(
            "pb-1",
            "Customer & Offer",
            "Ideal Customer Profile",
            StepKind::Input,
            StepStatus::Complete,
            vec![
                Field::new("icp", "Primary Customer", "Young professionals 25-38, $65k+ income, foodie-curious"),
                Field::new("pains", "Top 3 Pains", "No authentic ramen nearby; long waits at competition; no late-night option"),
                Field::new("promise", "Core Promise", "Best bowl in South Austin, ready in 12 minutes"),
            ],
        ),
        step(
            "pb-2",
            "Customer & Offer",
            "Menu & Service Model",
            StepKind::Input,
            StepStatus::InProgress,
            vec![
                Field::new("whatYouOffer", "What You Offer", "An authentic Japanese ramen restaurant serving tonkotsu-first bowls with locally sourced pork."),
                Field::new("menuItems", "Core Menu / Services", "6 ramen bowls, 4 starters, 3 drinks, daily special"),
                Field::new("packages", "Service Channels", "Dine-in, Takeout, Catering (groups 10+)"),
                Field::new("avgCheck", "Target Avg Check", "$22 per person"),
            ],
        ),
        step(
            "pb-3",
            "Market & Competitors",
            "Market & Competitor Analysis",
            StepKind::Validation,
            StepStatus::InProgress,
            vec![
                Field::new("marketSize", "Target Market Size", "~180,000 residents in the South Austin catchment"),
                Field::new("competitors", "Mapped Competitors", "7 of 10 complete"),
                Field::new("differentiation", "Key Differentiator", "Local pork sourcing + open kitchen + late-night"),
            ],
        ),
        step(
            "pb-4",
            "Location & Operations",
            "Location & Premises",
            StepKind::Input,
            StepStatus::InProgress,
            vec![
                Field::new("location", "Target Location", "South Congress Ave corridor"),
                Field::new("size", "Space Requirement", "1,200-1,800 sq ft, ground floor"),
                Field::new("fitOut", "Fit-Out Estimate", "$28,000-$35,000"),
            ],
        ),
        step(
            "pb-5",
            "Location & Operations",
            "Team & Staffing Plan",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("founders", "Founders / Roles", ""),
                Field::new("keyHires", "Key Hires (Day 1)", ""),
                Field::new("laborCost", "Est. Monthly Labor", ""),
            ],
        ),
        step(
            "pb-6",
            "Unit Economics",
            "Price & COGS Assumptions",
            StepKind::Input,
            StepStatus::InProgress,
            vec![
                Field::new("avgPrice", "Avg Bowl Price", "$16"),
                Field::new("cogsRange", "COGS Range", "28-34% (target 30%)"),
                Field::new("grossMargin", "Gross Margin Target", "66-72%"),
            ],
        ),
        step(
            "pb-7",
            "Unit Economics",
            "Break-Even Analysis",
            StepKind::Smart,
            StepStatus::Complete,
            vec![],
        ),
        step(
            "pb-8",
            "Legal & Compliance",
            "Legal & Licensing",
            StepKind::Input,
            StepStatus::InProgress,
            vec![
                Field::new("entity", "Business Entity", "LLC, filing in progress"),
                Field::new("licenses", "Required Licenses", ""),
                Field::new("timeline", "Filing Timeline", ""),
            ],
        ),
        step(
            "pb-9",
            "Go-to-Market",
            "Marketing & Launch Strategy",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("channels", "Marketing Channels", ""),
                Field::new("softLaunch", "Soft Launch Plan", ""),
                Field::new("openingWeek", "Opening Week Target", ""),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Pitch deck
// ---------------------------------------------------------------------------

pub fn pitch_sections() -> Vec<Step> {
    vec![
        step(
            "pd-1",
            "Slide 1",
            "Problem",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("painStatement", "The Problem", ""),
                Field::new("whoFaces", "Who Faces This", ""),
                Field::new("currentAlternatives", "Current Alternatives", ""),
            ],
        ),
        step(
            "pd-2",
            "Slide 2",
            "Solution",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("solution", "Your Solution", ""),
                Field::new("keyDifferentiator", "Key Differentiator", ""),
                Field::new("uniqueMechanism", "Unique Mechanism / Moat", ""),
            ],
        ),
        step(
            "pd-3",
            "Slide 3",
            "Market Size",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("tam", "Total Addressable Market (TAM)", ""),
                Field::new("sam", "Serviceable Market (SAM)", ""),
                Field::new("som", "Obtainable Market (SOM)", ""),
            ],
        ),
        step(
            "pd-4",
            "Slide 4",
            "Business Model",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("revenueStreams", "Revenue Streams", ""),
                Field::new("pricing", "Pricing Strategy", ""),
                Field::new("unitEconomics", "Unit Economics", ""),
            ],
        ),
        step(
            "pd-5",
            "Slide 5",
            "Financial Snapshot",
            StepKind::Smart,
            StepStatus::Complete,
            vec![],
        ),
        step(
            "pd-6",
            "Slide 6",
            "Team",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("founders", "Founders & Roles", ""),
                Field::new("advisors", "Advisors / Mentors", ""),
                Field::new("keyHires", "Key Hires Planned", ""),
            ],
        ),
        step(
            "pd-7",
            "Slide 7",
            "The Ask",
            StepKind::Input,
            StepStatus::Todo,
            vec![
                Field::new("amountSeeking", "Amount Seeking", ""),
                Field::new("equityOffered", "Equity / Terms", ""),
                Field::new("milestones", "12-Month Milestones", ""),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Execution projects & tasks
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    title: &str,
    description: &str,
    status: StepStatus,
    phase: ProjectPhase,
    unlock: Option<&str>,
    owner: Option<&str>,
    tasks: u32,
    completed: u32,
    notifications: u32,
) -> Project {
    Project {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        status,
        phase,
        unlock_condition: unlock.map(Into::into),
        owner: owner.map(Into::into),
        tasks,
        completed_tasks: completed,
        notifications,
    }
}

pub fn execution_projects() -> Vec<Project> {
    vec![
        project(
            "ep-1",
            "Market Research",
            "Competitor mapping, customer surveys, foot traffic analysis",
            StepStatus::InProgress,
            ProjectPhase::Active,
            None,
            Some("u-1"),
            5,
            2,
            2,
        ),
        project(
            "ep-2",
            "Location Scouting",
            "Shortlist venues on South Congress, assess rent & fit-out costs",
            StepStatus::InProgress,
            ProjectPhase::Active,
            None,
            Some("u-3"),
            4,
            1,
            0,
        ),
        project(
            "ep-3",
            "Supplier Sourcing",
            "Call farms & distributors, get ingredient quotes, arrange tastings",
            StepStatus::Todo,
            ProjectPhase::Active,
            None,
            Some("u-2"),
            4,
            0,
            1,
        ),
        project(
            "ep-4",
            "Legal Groundwork",
            "LLC formation, EIN, food handler & health permit research",
            StepStatus::InProgress,
            ProjectPhase::Active,
            None,
            Some("u-3"),
            3,
            1,
            0,
        ),
        project(
            "ep-6",
            "Brand Identity",
            "Logo, colour palette, menu design, signage",
            StepStatus::Todo,
            ProjectPhase::PostPlan,
            Some("Complete Business Plan"),
            None,
            8,
            0,
            0,
        ),
        project(
            "ep-7",
            "Lease & Fit-Out",
            "Sign lease, kitchen build-out, equipment install",
            StepStatus::Todo,
            ProjectPhase::PostPlan,
            Some("Complete Business Plan"),
            None,
            7,
            0,
            0,
        ),
        project(
            "ep-8",
            "Hiring & Training",
            "Hire kitchen & FOH staff, run training before soft launch",
            StepStatus::Todo,
            ProjectPhase::PostPlan,
            Some("Complete Business Plan"),
            None,
            10,
            0,
            0,
        ),
        project(
            "ep-9",
            "Technology & POS",
            "POS, online ordering, delivery platform integrations",
            StepStatus::Todo,
            ProjectPhase::PostPlan,
            Some("Complete Business Plan"),
            None,
            5,
            0,
            0,
        ),
        project(
            "ep-10",
            "Marketing & Pre-Launch",
            "Social media, PR, influencer outreach, soft launch event",
            StepStatus::Todo,
            ProjectPhase::PostPlan,
            Some("Complete Brand Identity"),
            None,
            12,
            0,
            0,
        ),
        project(
            "ep-11",
            "Funding Applications",
            "Submit grants and SBA loan application with completed plan",
            StepStatus::Todo,
            ProjectPhase::PostPlan,
            Some("Complete Business Plan"),
            None,
            6,
            0,
            0,
        ),
    ]
}

fn task(
    id: &str,
    title: &str,
    kind: StepKind,
    status: StepStatus,
    priority: Priority,
    assignee: &str,
    notifications: u32,
) -> ProjectTask {
    ProjectTask {
        id: id.into(),
        title: title.into(),
        kind,
        status,
        priority,
        assignee: Some(assignee.into()),
        notifications,
    }
}

pub fn project_tasks() -> HashMap<String, Vec<ProjectTask>> {
    let mut map = HashMap::new();
    map.insert(
        "ep-1".to_string(),
        vec![
            task("t1-1", "Survey 20 potential customers on ramen preferences", StepKind::Validation, StepStatus::InProgress, Priority::High, "u-1", 1),
            task("t1-2", "Map 10 direct & indirect competitors", StepKind::Validation, StepStatus::InProgress, Priority::High, "u-1", 0),
            task("t1-3", "Define catchment area and foot-traffic estimate", StepKind::Input, StepStatus::Todo, Priority::Medium, "u-3", 1),
            task("t1-4", "Analyse competitor pricing and menu gaps", StepKind::Validation, StepStatus::Todo, Priority::Medium, "u-1", 0),
            task("t1-5", "Identify underserved day-parts (lunch / late-night)", StepKind::Validation, StepStatus::Todo, Priority::Low, "u-3", 0),
        ],
    );
    map.insert(
        "ep-2".to_string(),
        vec![
            task("t2-1", "Shortlist 5 venues on South Congress corridor", StepKind::Input, StepStatus::InProgress, Priority::High, "u-3", 0),
            task("t2-2", "Record sq ft, asking rent, and fit-out condition", StepKind::Input, StepStatus::Todo, Priority::High, "u-3", 0),
            task("t2-3", "Check zoning and health-permit eligibility per site", StepKind::Validation, StepStatus::Todo, Priority::Medium, "u-2", 0),
            task("t2-4", "Estimate leasehold improvement cost per site", StepKind::Input, StepStatus::Todo, Priority::Medium, "u-3", 0),
        ],
    );
    map.insert(
        "ep-3".to_string(),
        vec![
            task("t3-1", "Get 3 quotes for Berkshire pork from local farms", StepKind::Input, StepStatus::Todo, Priority::High, "u-2", 1),
            task("t3-2", "Source noodle supplier and get sample pricing", StepKind::Input, StepStatus::Todo, Priority::Medium, "u-2", 0),
            task("t3-3", "Arrange ingredient tasting with top 2 suppliers", StepKind::Validation, StepStatus::Todo, Priority::Medium, "u-1", 0),
            task("t3-4", "Confirm backup suppliers for key ingredients", StepKind::Input, StepStatus::Todo, Priority::Low, "u-2", 0),
        ],
    );
    map.insert(
        "ep-4".to_string(),
        vec![
            task("t4-1", "Register LLC with Texas Secretary of State", StepKind::Input, StepStatus::InProgress, Priority::High, "u-3", 0),
            task("t4-2", "Apply for EIN from IRS", StepKind::Input, StepStatus::Todo, Priority::High, "u-3", 0),
            task("t4-3", "Research food handler permits and health inspections", StepKind::Validation, StepStatus::Todo, Priority::Medium, "u-2", 0),
        ],
    );
    map
}

// ---------------------------------------------------------------------------
// Funding opportunities & application steps
// ---------------------------------------------------------------------------

pub fn funding_opportunities() -> Vec<FundingOpportunity> {
    vec![
        FundingOpportunity {
            id: "f-1".into(),
            name: "Texas Restaurant Association Foundation Grant".into(),
            kind: FundingType::Grant,
            amount: "$10,000 - $25,000".into(),
            match_score: 87,
            deadline: "Mar 15, 2025".into(),
            requirements: vec![
                "TX-based".into(),
                "Food service".into(),
                "Under $1M revenue".into(),
                "BIPOC/Women preferred".into(),
            ],
            status: "Apply Now".into(),
        },
        FundingOpportunity {
            id: "f-2".into(),
            name: "City of Austin Small Business Program".into(),
            kind: FundingType::Grant,
            amount: "$5,000 - $15,000".into(),
            match_score: 79,
            deadline: "Rolling".into(),
            requirements: vec![
                "Austin-based".into(),
                "Under 50 employees".into(),
                "Under $5M revenue".into(),
            ],
            status: "Apply Now".into(),
        },
        FundingOpportunity {
            id: "f-3".into(),
            name: "SBA 7(a) Startup Loan".into(),
            kind: FundingType::Loan,
            amount: "$50k - $500k".into(),
            match_score: 72,
            deadline: "Rolling".into(),
            requirements: vec![
                "US-based".into(),
                "Business plan required".into(),
                "Personal guarantee".into(),
                "Credit 650+".into(),
            ],
            status: "Apply Now".into(),
        },
        FundingOpportunity {
            id: "f-4".into(),
            name: "National Restaurant Association Scholarship".into(),
            kind: FundingType::Scholarship,
            amount: "$2,500 - $10,000".into(),
            match_score: 65,
            deadline: "Apr 1, 2025".into(),
            requirements: vec![
                "Restaurant industry".into(),
                "Training/education focus".into(),
            ],
            status: "Apply Now".into(),
        },
        FundingOpportunity {
            id: "f-5".into(),
            name: "Accion Opportunity Fund".into(),
            kind: FundingType::Loan,
            amount: "$5k - $100k".into(),
            match_score: 61,
            deadline: "Rolling".into(),
            requirements: vec![
                "Minority-owned preferred".into(),
                "Business plan".into(),
                "Bank statements 3 months".into(),
            ],
            status: "Apply Now".into(),
        },
    ]
}

fn app_step(id: &str, num: u8, title: &str, kind: StepKind, fields: Vec<Field>) -> Step {
    let status = if kind == StepKind::Smart {
        StepStatus::Complete
    } else {
        StepStatus::Todo
    };
    Step {
        id: id.into(),
        phase: format!("Step {}", num),
        title: title.into(),
        kind,
        status,
        fields,
    }
}

/// Application steps keyed by opportunity id. Step 1 is always the smart
/// "Business Plan Context" card.
pub fn application_steps() -> HashMap<String, Vec<Step>> {
    let mut map = HashMap::new();
    map.insert(
        "f-1".to_string(),
        vec![
            app_step("fas-1-1", 1, "Business Plan Context", StepKind::Smart, vec![]),
            app_step(
                "fas-1-2",
                2,
                "Grant Application Essay",
                StepKind::Input,
                vec![
                    Field::new("businessOverview", "Business Overview (250 words)", ""),
                    Field::new("communityImpact", "Community Impact Statement", ""),
                    Field::new("fundUseDetail", "How Will You Use These Funds?", ""),
                ],
            ),
            app_step(
                "fas-1-3",
                3,
                "Supporting Documents Checklist",
                StepKind::Input,
                vec![
                    Field::new("taxId", "EIN / Tax ID", ""),
                    Field::new("bizAddress", "Registered Business Address", ""),
                    Field::new("ownerDemo", "Ownership Demographics", ""),
                ],
            ),
        ],
    );
    map.insert(
        "f-2".to_string(),
        vec![
            app_step("fas-2-1", 1, "Business Plan Context", StepKind::Smart, vec![]),
            app_step(
                "fas-2-2",
                2,
                "Austin Residency & Eligibility",
                StepKind::Input,
                vec![
                    Field::new("austinAddress", "Austin Business Address", ""),
                    Field::new("employeeCount", "Current / Planned Employee Count", ""),
                    Field::new("annualRevenue", "Last 12 Months Revenue (or $0)", ""),
                ],
            ),
            app_step(
                "fas-2-3",
                3,
                "Program Application Narrative",
                StepKind::Input,
                vec![
                    Field::new("businessNeed", "What Is Your Biggest Business Need?", ""),
                    Field::new("fundImpact", "How Will Funding Help You Grow?", ""),
                    Field::new("jobCreation", "Jobs You Plan to Create", ""),
                ],
            ),
        ],
    );
    map.insert(
        "f-3".to_string(),
        vec![
            app_step("fas-3-1", 1, "Business Plan Context", StepKind::Smart, vec![]),
            app_step(
                "fas-3-2",
                2,
                "Personal Financial Statement",
                StepKind::Input,
                vec![
                    Field::new("personalAssets", "Personal Assets (summary)", ""),
                    Field::new("personalLiabilities", "Personal Liabilities (summary)", ""),
                    Field::new("creditScore", "Credit Score Range", ""),
                ],
            ),
            app_step(
                "fas-3-3",
                3,
                "Business Plan Narrative",
                StepKind::Input,
                vec![
                    Field::new("executiveSummary", "Executive Summary (SBA Format)", ""),
                    Field::new("managementTeam", "Management Team Experience", ""),
                    Field::new("repaymentPlan", "Loan Repayment Plan", ""),
                ],
            ),
            app_step(
                "fas-3-4",
                4,
                "Collateral Documentation",
                StepKind::Input,
                vec![
                    Field::new("collateralAssets", "Assets Offered as Collateral", ""),
                    Field::new("personalGuarantee", "Personal Guarantee Statement", ""),
                    Field::new("bankStatements", "Bank Statements (3 months notes)", ""),
                ],
            ),
        ],
    );
    map.insert(
        "f-4".to_string(),
        vec![
            app_step("fas-4-1", 1, "Business Plan Context", StepKind::Smart, vec![]),
            app_step(
                "fas-4-2",
                2,
                "Education & Training Proposal",
                StepKind::Input,
                vec![
                    Field::new("trainingGoal", "Training / Education Goal", ""),
                    Field::new("programDetails", "Program Name & Institution", ""),
                    Field::new("industryImpact", "How This Improves Your Business", ""),
                ],
            ),
            app_step(
                "fas-4-3",
                3,
                "Personal Statement",
                StepKind::Input,
                vec![
                    Field::new("background", "Restaurant Industry Background", ""),
                    Field::new("careerGoals", "Career Goals", ""),
                    Field::new("scholarshipNeed", "Why You Need This Scholarship", ""),
                ],
            ),
        ],
    );
    map.insert(
        "f-5".to_string(),
        vec![
            app_step("fas-5-1", 1, "Business Plan Context", StepKind::Smart, vec![]),
            app_step(
                "fas-5-2",
                2,
                "Executive Summary",
                StepKind::Input,
                vec![
                    Field::new("businessDescription", "Business Description (2-3 sentences)", ""),
                    Field::new("marketOpportunity", "Market Opportunity", ""),
                    Field::new("competitiveEdge", "Competitive Edge", ""),
                ],
            ),
            app_step(
                "fas-5-3",
                3,
                "Financials & Bank History",
                StepKind::Input,
                vec![
                    Field::new("bankStatements", "Bank Account History (3 months)", ""),
                    Field::new("minorityOwnership", "Minority Ownership % (if applicable)", ""),
                    Field::new("loanPurpose", "Specific Loan Purpose", ""),
                ],
            ),
        ],
    );
    map
}

// ---------------------------------------------------------------------------
// Funding projects (in-flight applications shown on the hub)
// ---------------------------------------------------------------------------

pub fn funding_projects() -> Vec<FundingProject> {
    vec![
        FundingProject {
            id: "fp-1".into(),
            name: "TRA Foundation Grant".into(),
            kind: FundingType::Grant,
            amount: "$10,000 - $25,000".into(),
            deadline: "Mar 15, 2025".into(),
            status: StepStatus::InProgress,
            completed_tasks: 2,
            total_tasks: 6,
            notifications: 1,
        },
        FundingProject {
            id: "fp-2".into(),
            name: "SBA 7(a) Loan Prep".into(),
            kind: FundingType::Loan,
            amount: "$50k - $500k".into(),
            deadline: "Rolling".into(),
            status: StepStatus::Todo,
            completed_tasks: 0,
            total_tasks: 5,
            notifications: 0,
        },
        FundingProject {
            id: "fp-3".into(),
            name: "Austin Small Business Program".into(),
            kind: FundingType::Grant,
            amount: "$5,000 - $15,000".into(),
            deadline: "Rolling".into(),
            status: StepStatus::InProgress,
            completed_tasks: 1,
            total_tasks: 4,
            notifications: 0,
        },
    ]
}

fn funding_task(id: &str, title: &str, status: StepStatus, priority: Priority) -> ProjectTask {
    ProjectTask {
        id: id.into(),
        title: title.into(),
        kind: StepKind::Input,
        status,
        priority,
        assignee: None,
        notifications: 0,
    }
}

pub fn funding_project_tasks() -> HashMap<String, Vec<ProjectTask>> {
    let mut map = HashMap::new();
    map.insert(
        "fp-1".to_string(),
        vec![
            funding_task("ft1-1", "Extract Business Plan", StepStatus::Complete, Priority::High),
            funding_task("ft1-2", "Draft community impact statement", StepStatus::Complete, Priority::High),
            funding_task("ft1-3", "Collect ownership demographics docs", StepStatus::InProgress, Priority::High),
            funding_task("ft1-4", "Write fund-use breakdown", StepStatus::Todo, Priority::Medium),
            funding_task("ft1-5", "Get CPA review of financials", StepStatus::Todo, Priority::Medium),
            funding_task("ft1-6", "Submit before March deadline", StepStatus::Todo, Priority::Low),
        ],
    );
    map.insert(
        "fp-2".to_string(),
        vec![
            funding_task("ft2-1", "Extract Business Plan", StepStatus::Todo, Priority::High),
            funding_task("ft2-2", "Compile personal financial statement", StepStatus::Todo, Priority::High),
            funding_task("ft2-3", "Gather 3 months of bank statements", StepStatus::Todo, Priority::Medium),
            funding_task("ft2-4", "List collateral assets", StepStatus::Todo, Priority::Medium),
            funding_task("ft2-5", "Pull credit report", StepStatus::Todo, Priority::Low),
        ],
    );
    map.insert(
        "fp-3".to_string(),
        vec![
            funding_task("ft3-1", "Extract Business Plan", StepStatus::Complete, Priority::High),
            funding_task("ft3-2", "Confirm Austin business address", StepStatus::InProgress, Priority::High),
            funding_task("ft3-3", "Draft program narrative", StepStatus::Todo, Priority::Medium),
            funding_task("ft3-4", "Estimate planned job creation", StepStatus::Todo, Priority::Low),
        ],
    );
    map
}

// ---------------------------------------------------------------------------
// Financial plan
// ---------------------------------------------------------------------------

fn month(m: u32, revenue: i64, expenses: i64, net: i64) -> MonthProjection {
    MonthProjection { month: m, revenue, expenses, net }
}

pub fn financial_plan() -> FinancialPlan {
    FinancialPlan {
        estimated_budget: 129_000,
        break_even_month: 6,
        periods: vec![
            ProjectionPeriod {
                label: "1-12".into(),
                months: vec![
                    month(1, 22_000, 31_200, -9_200),
                    month(2, 31_000, 29_500, 1_500),
                    month(3, 38_000, 30_800, 7_200),
                    month(4, 42_000, 30_800, 11_200),
                    month(5, 46_000, 31_500, 14_500),
                    month(6, 51_000, 32_000, 19_000),
                    month(7, 53_000, 32_000, 21_000),
                    month(8, 55_000, 32_500, 22_500),
                    month(9, 56_000, 33_000, 23_000),
                    month(10, 57_000, 33_000, 24_000),
                    month(11, 58_000, 33_500, 24_500),
                    month(12, 60_000, 34_000, 26_000),
                ],
            },
            ProjectionPeriod {
                label: "13-24".into(),
                months: vec![
                    month(13, 62_000, 35_000, 27_000),
                    month(14, 63_000, 35_000, 28_000),
                    month(15, 65_000, 36_000, 29_000),
                    month(16, 67_000, 36_000, 31_000),
                    month(17, 68_000, 36_500, 31_500),
                    month(18, 70_000, 37_000, 33_000),
                    month(19, 72_000, 37_000, 35_000),
                    month(20, 73_000, 37_500, 35_500),
                    month(21, 75_000, 38_000, 37_000),
                    month(22, 76_000, 38_000, 38_000),
                    month(23, 78_000, 39_000, 39_000),
                    month(24, 80_000, 39_000, 41_000),
                ],
            },
        ],
        assumptions: vec![
            Assumption { label: "Avg Bowl Price".into(), value: "$16".into() },
            Assumption { label: "Gross Margin".into(), value: "66%".into() },
            Assumption { label: "Covers/Day (Month 1)".into(), value: "45".into() },
            Assumption { label: "Covers/Day (Month 6)".into(), value: "70".into() },
            Assumption { label: "Monthly Fixed Costs".into(), value: "$29,450".into() },
            Assumption { label: "COGS %".into(), value: "30%".into() },
        ],
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

fn budget_line(category: &str, budgeted: i64, actual: i64, status: BudgetStatus) -> BudgetLine {
    BudgetLine {
        category: category.into(),
        budgeted,
        actual,
        status,
    }
}

pub fn budget_data() -> BudgetData {
    BudgetData {
        startup_costs: vec![
            budget_line("Equipment & Kitchen", 45_000, 0, BudgetStatus::Estimated),
            budget_line("Leasehold Improvements", 30_000, 0, BudgetStatus::Estimated),
            budget_line("Legal & Licensing", 3_500, 1_200, BudgetStatus::InProgress),
            budget_line("Branding & Marketing", 8_000, 0, BudgetStatus::Estimated),
            budget_line("Technology & POS", 4_500, 0, BudgetStatus::Estimated),
            budget_line("Initial Inventory", 6_000, 0, BudgetStatus::Estimated),
            budget_line("Working Capital Reserve", 15_000, 0, BudgetStatus::Estimated),
        ],
        monthly_fixed: vec![
            budget_line("Rent", 6_500, 0, BudgetStatus::Estimated),
            budget_line("Labor (est.)", 18_000, 0, BudgetStatus::Estimated),
            budget_line("Utilities", 2_200, 0, BudgetStatus::Estimated),
            budget_line("Insurance", 800, 0, BudgetStatus::Estimated),
            budget_line("Technology", 450, 0, BudgetStatus::Estimated),
            budget_line("Marketing", 1_500, 0, BudgetStatus::Estimated),
        ],
    }
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

pub fn finance_seed() -> FinanceSeed {
    FinanceSeed {
        budget_required: 129_000,
        budget_available: 0,
        expenses: vec![ExpenseEntry {
            id: "e-1".into(),
            amount: 1_200.0,
            project: "Legal Formation".into(),
            reason: "LLC filing fee + registered agent".into(),
            date: "Jan 12".into(),
        }],
        projects: vec![
            "Legal Formation".into(),
            "Market Research".into(),
            "Brand Identity".into(),
            "Technology & POS".into(),
            "General".into(),
        ],
    }
}

pub fn revenue_seed() -> RevenueSeed {
    RevenueSeed {
        sources: vec![
            "Pre-orders".into(),
            "Catering Deposits".into(),
            "Pop-up Events".into(),
            "Merchandise".into(),
            "Other".into(),
        ],
        entries: vec![],
    }
}

// ---------------------------------------------------------------------------
// Funding chat
// ---------------------------------------------------------------------------

pub fn funding_chat() -> Vec<ChatMessage> {
    vec![ChatMessage {
        id: "msg-1".into(),
        role: ChatRole::Assistant,
        text: "Hi! I'm your Funding Assistant. I can help you find grants, loans, and investment opportunities for Ramen Shop.".into(),
        context_note: Some("Based on: South Austin, TX / Food Service / Pre-revenue startup".into()),
        question: Some(ChatQuestion {
            prompt: "What type of funding are you looking for?".into(),
            options: vec![
                "Grants (free money)".into(),
                "SBA / Bank Loans".into(),
                "Angel Investment".into(),
                "All of the above".into(),
            ],
        }),
        date_label: true,
    }]
}

// ---------------------------------------------------------------------------
// Experts
// ---------------------------------------------------------------------------

pub fn experts() -> Vec<Expert> {
    vec![
        Expert {
            id: "x-1".into(),
            name: "Maria Gonzalez".into(),
            initials: "MG".into(),
            title: "SBA & Grant Specialist".into(),
            rating: 4.9,
            reviews: 127,
            specialties: vec!["SBA Loans".into(), "Restaurant Grants".into(), "TX Programs".into()],
            bio: "12 years helping food service entrepreneurs in Texas secure funding.".into(),
        },
        Expert {
            id: "x-2".into(),
            name: "James Park".into(),
            initials: "JP".into(),
            title: "Restaurant Finance Advisor".into(),
            rating: 4.8,
            reviews: 94,
            specialties: vec!["Angel Investment".into(), "Business Valuation".into(), "Pitch Prep".into()],
            bio: "Former restaurant operator turned finance advisor. Raised $4M+ for clients.".into(),
        },
        Expert {
            id: "x-3".into(),
            name: "Aisha Thompson".into(),
            initials: "AT".into(),
            title: "BIPOC Business Funding Expert".into(),
            rating: 5.0,
            reviews: 63,
            specialties: vec!["BIPOC Grants".into(), "Austin Programs".into(), "Minority Loans".into()],
            bio: "Specialist in minority-owned business funding and City of Austin programs.".into(),
        },
        Expert {
            id: "x-4".into(),
            name: "Carlos Rivera".into(),
            initials: "CR".into(),
            title: "Small Business Loan Broker".into(),
            rating: 4.7,
            reviews: 218,
            specialties: vec!["Bank Loans".into(), "Collateral Planning".into(), "Credit Building".into()],
            bio: "Broker with access to 30+ lenders specializing in food & hospitality.".into(),
        },
    ]
}

pub fn time_slots() -> Vec<TimeSlotGroup> {
    vec![
        TimeSlotGroup {
            id: "ts-1".into(),
            day: "Mon, Feb 24".into(),
            times: vec!["9:00 AM".into(), "10:30 AM".into(), "2:00 PM".into()],
        },
        TimeSlotGroup {
            id: "ts-2".into(),
            day: "Tue, Feb 25".into(),
            times: vec!["11:00 AM".into(), "3:30 PM".into(), "4:00 PM".into()],
        },
        TimeSlotGroup {
            id: "ts-3".into(),
            day: "Wed, Feb 26".into(),
            times: vec!["9:30 AM".into(), "1:00 PM".into()],
        },
    ]
}
