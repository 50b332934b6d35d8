//! Console reporting

use anyhow::Result;
use monkey_business_core::SimulationSnapshot;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    snapshot: &'a SimulationSnapshot,
    monkey_business: u64,
}

/// Plain-text summary: one line per actor, then the metric
pub fn render_summary(snapshot: &SimulationSnapshot, monkey_business: u64) -> String {
    let mut lines = Vec::with_capacity(snapshot.actors.len() + 2);
    lines.push(format!("After {} rounds:", snapshot.rounds_completed));
    lines.extend(snapshot.actors.iter().map(|actor| {
        format!(
            "Monkey {} inspected items {} times.",
            actor.id, actor.inspection_count
        )
    }));
    lines.push(format!("monkey business: {}", monkey_business));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_json(snapshot: &SimulationSnapshot, monkey_business: u64) -> Result<String> {
    let report = JsonReport {
        snapshot,
        monkey_business,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
