use advisory_core::universe::{asset_display_name, category_display_name};
use advisory_core::AssetRecommendation;

use crate::SummaryReport;

const RULE: &str = "============================================================";

/// Readings without a name fall back to the symbol; prefer the universe name then.
fn display_name(rec: &AssetRecommendation) -> &str {
    if rec.name != rec.symbol {
        &rec.name
    } else {
        asset_display_name(&rec.symbol).unwrap_or(rec.name.as_str())
    }
}

/// Escape the characters legacy Telegram Markdown treats as entity markers.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl SummaryReport<'_> {
    /// Telegram-flavoured Markdown push text.
    pub fn render_markdown(&self) -> String {
        let mut out = format!(
            "📊 *Cross-Asset Advisory Summary*\n⏰ {}\nAnalyzed {} instruments\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.instrument_count()
        );

        let distribution: Vec<String> = self
            .signal_distribution()
            .iter()
            .map(|(signal, count)| format!("{} {} {}", signal.icon(), signal.label(), count))
            .collect();
        if !distribution.is_empty() {
            out.push_str(&distribution.join(" | "));
            out.push('\n');
        }

        if self.top_picks.is_empty() {
            out.push_str("\nNo instrument cleared the pick threshold\n");
            return out;
        }

        out.push_str("\n*Top Picks*\n");
        for rec in &self.top_picks {
            out.push_str(&format!(
                "#{} {} {} ({}) {:.0}/100 {}\n    stop ${:.2} | target ${:.2} | size {}\n",
                rec.overall_rank,
                rec.consensus_signal.icon(),
                escape_markdown(&rec.symbol),
                escape_markdown(display_name(rec)),
                rec.consensus_score,
                rec.consensus_signal,
                rec.stop_loss,
                rec.take_profit,
                rec.position_size
            ));
        }

        if !self.category_leaders.is_empty() {
            out.push_str("\n*Category Leaders*\n");
            for (category, rec) in &self.category_leaders {
                out.push_str(&format!(
                    "{}: {} {:.0}/100 {}\n",
                    escape_markdown(category_display_name(category)),
                    escape_markdown(&rec.symbol),
                    rec.consensus_score,
                    rec.consensus_signal
                ));
            }
        }

        out
    }

    /// Plain-text console report. `verbose` adds every expert's reasoning.
    pub fn render_console(&self, verbose: bool) -> String {
        let mut out = format!(
            "{rule}\n📈 Advisory report, {} ({} instruments)\n{rule}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.instrument_count(),
            rule = RULE
        );

        for rec in self.recommendations {
            out.push_str(&format!(
                "#{:<3} {} {:<10} [{} #{}] {} {:.1}/100, risk {}, size {}\n",
                rec.overall_rank,
                rec.consensus_signal.icon(),
                rec.symbol,
                category_display_name(&rec.category),
                rec.rank_in_category,
                rec.consensus_signal,
                rec.consensus_score,
                rec.risk_level,
                rec.position_size
            ));
            out.push_str(&format!(
                "     ${:.2}  stop ${:.2}  target ${:.2}  {}\n",
                rec.current_price, rec.stop_loss, rec.take_profit, rec.consensus_reasoning
            ));
            if verbose {
                for opinion in &rec.opinions {
                    out.push_str(&format!(
                        "       {:<16} {:<10} {}\n",
                        opinion.expert.display_name(),
                        opinion.signal.label(),
                        opinion.reasoning
                    ));
                }
            }
        }

        out.push_str(RULE);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use advisory_core::{ExpertKind, ExpertOpinion, RiskTier, Signal};
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn rec(symbol: &str, category: &str, signal: Signal, score: f64, rank: usize) -> AssetRecommendation {
        AssetRecommendation {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            category: category.to_string(),
            current_price: 100.0,
            opinions: ExpertKind::ALL
                .map(|kind| ExpertOpinion::new(kind, signal, format!("{} view", kind), 0.5, json!({}))),
            consensus_signal: signal,
            consensus_score: score,
            consensus_reasoning: "test".to_string(),
            risk_level: RiskTier::Low,
            position_size: "5–10%".to_string(),
            stop_loss: 90.0,
            take_profit: 120.0,
            rank_in_category: 1,
            overall_rank: rank,
        }
    }

    fn at_noon(report: SummaryReport<'_>) -> SummaryReport<'_> {
        report.with_timestamp(chrono::Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_markdown_lists_picks_and_leaders() {
        let recs = vec![
            rec("NVDA", "us_stocks", Signal::Buy, 76.0, 1),
            rec("BTC-USD", "crypto", Signal::Hold, 40.0, 2),
        ];
        let mut leaders = BTreeMap::new();
        leaders.insert("us_stocks", &recs[0]);
        let report = at_noon(SummaryReport::new(&recs, vec![&recs[0]], leaders));

        let text = report.render_markdown();
        assert!(text.contains("⏰ 2026-03-02 12:00 UTC"));
        assert!(text.contains("Analyzed 2 instruments"));
        assert!(text.contains("🟢🟢 Buy 1 | 🟡 Hold 1"));
        // Universe name stands in for a missing reading name
        assert!(text.contains("#1 🟢🟢 NVDA (NVIDIA Corp.) 76/100 Buy"));
        assert!(text.contains("stop $90.00 | target $120.00 | size 5–10%"));
        assert!(text.contains("US Stocks: NVDA 76/100 Buy"));
        assert!(!text.contains("BTC-USD ("));
    }

    #[test]
    fn test_markdown_without_picks() {
        let recs = vec![rec("XLE", "energy", Signal::Hold, 40.0, 1)];
        let report = SummaryReport::new(&recs, Vec::new(), BTreeMap::new());
        let text = report.render_markdown();
        assert!(text.contains("No instrument cleared the pick threshold"));
        assert!(!text.contains("*Top Picks*"));
    }

    #[test]
    fn test_markdown_escapes_entity_markers() {
        let mut custom = rec("MY_ETF", "my_cat", Signal::Buy, 72.0, 1);
        custom.name = "Fund *Plus*".to_string();
        let recs = vec![custom];
        let mut leaders = BTreeMap::new();
        leaders.insert("my_cat", &recs[0]);
        let report = SummaryReport::new(&recs, vec![&recs[0]], leaders);

        let text = report.render_markdown();
        assert!(text.contains("MY\\_ETF (Fund \\*Plus\\*) 72/100 Buy"));
        assert!(text.contains("my\\_cat: MY\\_ETF 72/100 Buy"));
        // Section headings keep their bold markers
        assert!(text.contains("\n*Top Picks*\n"));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("BTC-USD"), "BTC-USD");
        assert_eq!(escape_markdown("a_b*c`d[e"), "a\\_b\\*c\\`d\\[e");
    }

    #[test]
    fn test_console_verbose_includes_expert_reasoning() {
        let recs = vec![rec("GLD", "precious_metals", Signal::WeakBuy, 56.0, 1)];
        let report = at_noon(SummaryReport::new(&recs, Vec::new(), BTreeMap::new()));

        let terse = report.render_console(false);
        assert!(terse.contains("GLD"));
        assert!(terse.contains("[Precious Metals #1]"));
        assert!(terse.contains("56.0/100"));
        assert!(!terse.contains("Band + CCI"));

        let verbose = report.render_console(true);
        assert!(verbose.contains("Trend Following"));
        assert!(verbose.contains("Band + CCI"));
        assert!(verbose.contains("Value view"));
        assert!(verbose.ends_with(&format!("{}\n", RULE)));
    }
}
