//! Local keyword rule engine (offline advisory stage)
//!
//! A fixed, ordered list of regex keyword families. The first rule whose
//! pattern matches the report text wins, and declaration order matters:
//! the families overlap (e.g. "pole" belongs to the electrical family, so
//! the electrical rule must run before any later family could steal it).

use std::sync::LazyLock;

use regex::Regex;
use shared::models::{AdvisoryRecord, Severity};

struct KeywordRule {
    name: &'static str,
    pattern: Regex,
    record: fn() -> AdvisoryRecord,
}

/// Declaration order is load-bearing: pothole, electrical, water, garbage,
/// manhole.
static RULES: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    vec![
        KeywordRule {
            name: "pothole",
            pattern: compile(r"(?i)pothole|pot\s+hole|road\s+crack|asphalt|crater|road\s+damage"),
            record: pothole_record,
        },
        KeywordRule {
            name: "electrical",
            pattern: compile(
                r"(?i)street\s*light|lamp|pole|wire|electric|shock|spark|transformer|voltage",
            ),
            record: electrical_record,
        },
        KeywordRule {
            name: "water",
            pattern: compile(r"(?i)water|leak|pipe|burst|drainage|sewage|flood|tap"),
            record: water_record,
        },
        KeywordRule {
            name: "garbage",
            pattern: compile(r"(?i)garbage|trash|waste|dump|litter|rubbish|smell"),
            record: garbage_record,
        },
        KeywordRule {
            name: "manhole",
            pattern: compile(r"(?i)manhole|man\s+hole|open\s+drain|uncovered|missing\s+cover"),
            record: manhole_record,
        },
    ]
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("keyword rule pattern is valid")
}

/// Test the report text against the rule list; first match wins.
pub fn match_text(text: &str) -> Option<AdvisoryRecord> {
    let rule = RULES.iter().find(|r| r.pattern.is_match(text))?;
    tracing::debug!(rule = rule.name, "advisory matched local keyword rule");
    Some((rule.record)())
}

fn pothole_record() -> AdvisoryRecord {
    AdvisoryRecord {
        severity: Severity::High,
        category: "Potholes".to_string(),
        estimated_time: "1-2 Days".to_string(),
        impact_scope: 65,
        precautions: vec![
            "Place traffic cones or bright markers around the damaged patch.".to_string(),
            "Slow down approaching vehicles; deep craters damage axles and rims.".to_string(),
            "Keep two-wheelers away from the edge, especially after rain.".to_string(),
        ],
        diy_fixes: vec![
            "Fill the hole with coarse gravel as a stopgap.".to_string(),
            "Mark the spot with a painted circle so it stays visible at night.".to_string(),
            "Divert traffic to the adjacent lane if the crater keeps growing.".to_string(),
        ],
        summary: "Road surface damage that endangers passing vehicles.".to_string(),
    }
}

fn electrical_record() -> AdvisoryRecord {
    AdvisoryRecord {
        severity: Severity::Critical,
        category: "Street Light".to_string(),
        estimated_time: "4-8 Hours".to_string(),
        impact_scope: 80,
        precautions: vec![
            "Do not touch the pole, wires, or anything metallic nearby.".to_string(),
            "Keep a wide perimeter; wet ground can conduct stray voltage.".to_string(),
            "Warn pedestrians away until the supply is isolated.".to_string(),
        ],
        diy_fixes: vec![
            "Tie reflective tape or red cloth at eye level as a warning.".to_string(),
            "Report the feeder/pole number to the electricity helpline.".to_string(),
            "Light the stretch temporarily with a battery lamp if it is a walkway.".to_string(),
        ],
        summary: "Electrical fault on public lighting infrastructure.".to_string(),
    }
}

fn water_record() -> AdvisoryRecord {
    AdvisoryRecord {
        severity: Severity::High,
        category: "Water Leakage".to_string(),
        estimated_time: "2-4 Hours".to_string(),
        impact_scope: 70,
        precautions: vec![
            "Avoid using the leaking supply for drinking until tested.".to_string(),
            "Keep electrical equipment clear of pooling water.".to_string(),
            "Watch for road undermining near a long-running leak.".to_string(),
        ],
        diy_fixes: vec![
            "Close the nearest stop valve to cut pressure on the burst section.".to_string(),
            "Wrap the joint with rubber sheet and hose clamps as a stopgap.".to_string(),
            "Channel the runoff toward a drain to limit flooding.".to_string(),
        ],
        summary: "Leaking or burst water supply line.".to_string(),
    }
}

fn garbage_record() -> AdvisoryRecord {
    AdvisoryRecord {
        severity: Severity::Medium,
        category: "Garbage".to_string(),
        estimated_time: "1 Day".to_string(),
        impact_scope: 40,
        precautions: vec![
            "Keep children and pets away from the accumulation.".to_string(),
            "Do not burn the pile; mixed waste releases toxic fumes.".to_string(),
            "Cover nearby food or water sources against pests.".to_string(),
        ],
        diy_fixes: vec![
            "Bag loose waste to stop it from spreading in the wind.".to_string(),
            "Sprinkle bleaching powder to suppress odour and flies.".to_string(),
            "Note the pile location and recurring dump times for the crew.".to_string(),
        ],
        summary: "Uncollected garbage accumulation.".to_string(),
    }
}

fn manhole_record() -> AdvisoryRecord {
    AdvisoryRecord {
        severity: Severity::Critical,
        category: "Manhole".to_string(),
        estimated_time: "Immediate".to_string(),
        impact_scope: 90,
        precautions: vec![
            "Barricade the opening on all sides immediately.".to_string(),
            "Never lean over the shaft; sewer gas can cause blackouts.".to_string(),
            "Keep the spot lit or marked after dark.".to_string(),
        ],
        diy_fixes: vec![
            "Cover the opening with a sturdy board weighted at the corners.".to_string(),
            "Plant a visible stick or flag in the opening as a marker.".to_string(),
            "Redirect foot traffic to the far side of the street.".to_string(),
        ],
        summary: "Open or uncovered manhole posing a fall hazard.".to_string(),
    }
}
