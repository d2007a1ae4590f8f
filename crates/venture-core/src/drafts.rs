//! Precomputed assistant draft text, keyed by step id.
//!
//! Each record is a partial field update: only the listed keys are
//! overwritten when a draft lands, and a step id (or field key) with no
//! entry is a no-op rather than an error.

use std::collections::HashMap;

/// step id -> ordered (field key, draft text) pairs.
pub type DraftTable = HashMap<String, Vec<(String, String)>>;

fn record(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Drafts for the business-plan steps.
pub fn plan_drafts() -> DraftTable {
    let mut table = DraftTable::new();
    table.insert(
        "pb-1".into(),
        record(&[
            ("icp", "Young professionals aged 25-38, household income $65k+, living or working within 3 miles of South Congress Ave. Foodie-curious, values authenticity and speed."),
            ("pains", "1. No authentic tonkotsu ramen within 5 miles. 2. Long waits (45+ min) at competing ramen spots north of the river. 3. No quality late-night ramen option after 9 PM."),
            ("promise", "The best ramen bowl in South Austin, ready in under 12 minutes, made with locally sourced Berkshire pork."),
        ]),
    );
    table.insert(
        "pb-2".into(),
        record(&[
            ("menuItems", "Tonkotsu Classic, Spicy Miso, Shoyu Chicken, Vegan Shio, Chef Special (rotating), Kids Bowl. Starters: Gyoza, Karaage, Edamame, Chashu Bao."),
            ("packages", "Dine-in (40 seats), takeout / curbside, catering packages for groups 10+, DoorDash / Uber Eats delivery."),
            ("avgCheck", "$22 per person including one add-on (egg, extra chashu, or noodle upgrade)."),
        ]),
    );
    table.insert(
        "pb-3".into(),
        record(&[
            ("competitors", "10 mapped. Direct: Ramen Tatsu-Ya (North Austin, 45 min away), Yume Wo Katare. Indirect: Soup Peddler, Uchi, local pho shops."),
            ("differentiation", "Local Berkshire pork broth, open kitchen, South Austin neighborhood identity, delivery-first packaging, late-night hours until midnight Fri/Sat."),
        ]),
    );
    table.insert(
        "pb-6".into(),
        record(&[
            ("avgPrice", "$16 for signature bowls. Range $13 (kids) to $19 (premium)."),
            ("cogsRange", "28-34%. Pork broth COGS ~30%, proteins ~32%, vegetables ~18%. Blended target: 30%."),
            ("grossMargin", "Target 66-70% gross margin. Comparable Austin restaurants: 62-72%."),
        ]),
    );
    // Deliberately partial: only the licensing field has canned text, the
    // entity and timeline fields keep whatever the user typed.
    table.insert(
        "pb-8".into(),
        record(&[(
            "licenses",
            "TX food service permit, City of Austin health permit, food handler certifications for all kitchen staff, TABC license if serving beer.",
        )]),
    );
    table
}

/// Drafts for the funding-application steps.
pub fn funding_drafts() -> DraftTable {
    let mut table = DraftTable::new();
    table.insert(
        "fas-1-2".into(),
        record(&[
            ("businessOverview", "Ramen Shop is a tonkotsu-first Japanese restaurant opening on South Congress Ave, Austin TX. We serve locally sourced Berkshire pork broth ramen with dine-in, takeout, and catering."),
            ("communityImpact", "We will hire 8-10 South Austin residents, source from 2 local farms within 60 miles, and become an anchor tenant supporting foot traffic on SoCo."),
            ("fundUseDetail", "Funds will cover kitchen fit-out ($35k), equipment ($45k), and working capital for the first 3 months of operations while we scale to break-even at Month 6."),
        ]),
    );
    table.insert(
        "fas-1-3".into(),
        record(&[
            ("taxId", "EIN application in progress with IRS (Form SS-4 submitted Jan 2025)"),
            ("bizAddress", "1234 South Congress Ave, Austin, TX 78704 (lease pending signature)"),
            ("ownerDemo", "Founder is an immigrant entrepreneur. Business will be >51% minority-owned."),
        ]),
    );
    table.insert(
        "fas-2-2".into(),
        record(&[
            ("austinAddress", "1234 South Congress Ave, Austin, TX 78704"),
            ("employeeCount", "0 current (pre-open). Planned: 10 FTE within 90 days of opening."),
            ("annualRevenue", "$0 (pre-revenue startup, opening Q2 2025)"),
        ]),
    );
    table.insert(
        "fas-3-2".into(),
        record(&[
            ("personalAssets", "Primary residence equity ~$180k, savings $42k, retirement accounts $65k. Total: ~$287k."),
            ("personalLiabilities", "Mortgage balance $310k, auto loan $8k, student loans $0. Total: ~$318k."),
            ("creditScore", "715 (Experian, pulled Jan 2025)"),
        ]),
    );
    table.insert(
        "fas-5-2".into(),
        record(&[
            ("businessDescription", "Ramen Shop is a tonkotsu-first Japanese restaurant opening in South Austin, TX serving house-made 18-hour pork broth ramen bowls with local Berkshire pork."),
            ("marketOpportunity", "No authentic ramen restaurant exists within 5 miles of our target location. The South Austin food market generates $12M annually with no Japanese-first operator."),
            ("competitiveEdge", "Local pork sourcing story, open-kitchen format, late-night hours, and delivery-optimized packaging. No competitor offers all four."),
        ]),
    );
    table
}
