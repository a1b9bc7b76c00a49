use photo_guide_common::CompositionReport;
use std::fmt::Write;

/// ルールごとのスコア表
pub fn render_score_table(report: &CompositionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "総合スコア: {:.1} / 100  (ジャンル: {})",
        report.total_score, report.genre
    );
    for rule in &report.rules {
        let _ = writeln!(out, "  {:<15} {:>5.1}  {}", rule.rule.display_name(), rule.score, rule.message);
        let _ = writeln!(out, "  {:<15}        → {}", "", rule.suggestion);
    }
    out
}

/// スコア表・コーチガイド・エキスパートプロンプトをまとめたテキスト
pub fn render_report(report: &CompositionReport) -> String {
    let size = report.metadata.image_size;
    format!(
        "画像サイズ: {}x{}\n{}\n■ コーチガイド\n{}\n\n■ エキスパートプロンプト\n{}\n",
        size.width,
        size.height,
        render_score_table(report),
        report.coach_guide,
        report.expert_prompt
    )
}
