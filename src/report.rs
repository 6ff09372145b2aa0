//! Text, CSV and JSON rendering of analysis results

use serde_json::{json, Value};
use std::fmt::Write;

use crate::analysis::jersey::JerseyMap;
use crate::analysis::pass_graph::PassGraph;
use crate::analysis::pass_length::PassLengths;
use crate::analysis::patterns::Patterns;
use crate::analysis::player::PlayerPassReport;
use crate::analysis::playtime::PlayingTime;
use crate::analysis::network::PassNetwork;
use crate::{Token, TokenCodes};

/// `|7|-1|100` style rendering of a token run
pub fn tokens_to_string(tokens: &[Token], codes: &TokenCodes) -> String {
    tokens.iter().fold(String::new(), |mut out, t| {
        let _ = write!(out, "|{}", t.code(codes));
        out
    })
}

fn token_codes(tokens: &[Token], codes: &TokenCodes) -> Vec<i64> {
    tokens.iter().map(|t| t.code(codes)).collect()
}

fn rule(title: &str) -> String {
    format!("{}\n───────────────────────────────\n", title)
}

pub fn patterns_table(patterns: &Patterns, codes: &TokenCodes) -> String {
    let mut out = rule("Repeated patterns");
    if patterns.is_empty() {
        out.push_str("  No repeated patterns\n");
    }
    for (length, found) in patterns {
        let _ = writeln!(out, "  Length {}:", length);
        for pattern in found {
            let _ = writeln!(
                out,
                "    {:>3}x  {}",
                pattern.count,
                tokens_to_string(&pattern.tokens, codes)
            );
        }
    }
    out
}

pub fn patterns_csv(patterns: &Patterns, codes: &TokenCodes) -> String {
    let mut out = String::from("length,count,pattern\n");
    for (length, found) in patterns {
        for pattern in found {
            let _ = writeln!(
                out,
                "{},{},{}",
                length,
                pattern.count,
                tokens_to_string(&pattern.tokens, codes)
            );
        }
    }
    out
}

pub fn patterns_json(patterns: &Patterns, codes: &TokenCodes) -> Value {
    let map: serde_json::Map<String, Value> = patterns
        .iter()
        .map(|(length, found)| {
            let entries: Vec<Value> = found
                .iter()
                .map(|p| json!({ "tokens": token_codes(&p.tokens, codes), "count": p.count }))
                .collect();
            (length.to_string(), Value::Array(entries))
        })
        .collect();
    Value::Object(map)
}

pub fn buildups_table(buildups: &[Vec<Token>], codes: &TokenCodes) -> String {
    let mut out = rule("Shot buildups");
    if buildups.is_empty() {
        out.push_str("  No buildups\n");
    }
    for (i, buildup) in buildups.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}. ({:>2} tokens) {}",
            i + 1,
            buildup.len(),
            tokens_to_string(buildup, codes)
        );
    }
    out
}

pub fn buildups_json(buildups: &[Vec<Token>], codes: &TokenCodes) -> Value {
    Value::Array(
        buildups
            .iter()
            .map(|b| json!(token_codes(b, codes)))
            .collect(),
    )
}

pub fn graph_table(label: &str, graph: &PassGraph, jerseys: &JerseyMap) -> String {
    let mut out = rule(&format!("{} passes ({} edges)", label, graph.edge_count()));
    for ((from, to), count) in graph.weighted_edges() {
        let name = jerseys.player_for(from).unwrap_or("?");
        let _ = writeln!(out, "  {:>3} -> {:>3}  x{:<3} {}", from, to, count, name);
    }
    out
}

pub fn graph_csv(label: &str, graph: &PassGraph) -> String {
    let mut out = String::new();
    for ((from, to), count) in graph.weighted_edges() {
        let _ = writeln!(out, "{},{},{},{}", label, from, to.code(), count);
    }
    out
}

pub fn graph_json(graph: &PassGraph) -> Value {
    json!({
        "nodes": graph.nodes().iter().map(|n| n.get()).collect::<Vec<_>>(),
        "edges": graph
            .edges()
            .iter()
            .map(|(from, to)| json!([from.get(), to.code()]))
            .collect::<Vec<_>>(),
    })
}

pub fn network_table(network: &PassNetwork) -> String {
    let mut out = rule(&format!("Pass network for {}", network.team));
    out.push_str("  Average positions:\n");
    for node in &network.nodes {
        let _ = writeln!(
            out,
            "    {:<35} ({:>5.1}, {:>5.1})  {:>3} passes",
            node.player, node.location.x, node.location.y, node.passes
        );
    }
    out.push_str("  Links:\n");
    for edge in &network.edges {
        let _ = writeln!(out, "    {:>3}  {} -> {}", edge.passes, edge.from, edge.to);
    }
    out
}

pub fn network_csv(network: &PassNetwork) -> String {
    let mut out = String::from("from,to,passes,from_x,from_y,to_x,to_y\n");
    for e in &network.edges {
        let _ = writeln!(
            out,
            "{},{},{},{:.2},{:.2},{:.2},{:.2}",
            e.from, e.to, e.passes, e.from_location.x, e.from_location.y, e.to_location.x, e.to_location.y
        );
    }
    out
}

pub fn playtime_table(played: &PlayingTime) -> String {
    let mut out = rule("Playing time");
    let _ = writeln!(out, "  Match length: {:.1} min", played.match_seconds as f64 / 60.0);
    let mut rows: Vec<(&String, &u32)> = played.seconds.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (player, seconds) in rows {
        let _ = writeln!(out, "  {:<35} {:>5.1} min", player, *seconds as f64 / 60.0);
    }
    out
}

pub fn playtime_csv(played: &PlayingTime) -> String {
    let mut out = String::from("player,seconds\n");
    for (player, seconds) in &played.seconds {
        let _ = writeln!(out, "{},{}", player, seconds);
    }
    out
}

pub fn pass_lengths_table(lengths: &PassLengths) -> String {
    let mut out = rule("Pass lengths");
    for s in lengths.summaries() {
        let _ = writeln!(
            out,
            "  {:<35} {:>3} passes  mean {:>5.1}  max {:>5.1}",
            s.player, s.count, s.mean, s.max
        );
    }
    out
}

pub fn pass_lengths_csv(lengths: &PassLengths) -> String {
    let mut out = String::from("player,count,mean,max\n");
    for s in lengths.summaries() {
        let _ = writeln!(out, "{},{},{:.2},{:.2}", s.player, s.count, s.mean, s.max);
    }
    out
}

pub fn player_table(report: &PlayerPassReport) -> String {
    let mut out = rule(&format!("Passes for {}", report.player));
    let _ = writeln!(out, "  Total: {}", report.passes.len());
    for (outcome, share) in &report.outcome_shares {
        let _ = writeln!(out, "  {:<20} {:>5.1}%", outcome, share);
    }
    out
}

pub fn player_csv(report: &PlayerPassReport) -> String {
    let mut out = String::from("minute,start_x,start_y,end_x,end_y,outcome\n");
    let coord = |v: Option<f64>| v.map(|c| format!("{:.1}", c)).unwrap_or_default();
    for p in &report.passes {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            p.minute,
            coord(p.start.map(|l| l.x)),
            coord(p.start.map(|l| l.y)),
            coord(p.end.map(|l| l.x)),
            coord(p.end.map(|l| l.y)),
            p.outcome
        );
    }
    out
}
