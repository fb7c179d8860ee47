// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use roster_scrape::{
    config::consts::ID_MONTH_HEADING,
    core::Document,
    specs::{month, postback::PostbackTokens},
};

/// A month page shaped like the live roster: large viewstate blob, scripts,
/// six-week grid with a few padding cells.
fn sample_page() -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><script>var x = '<td>';</script></head><body><form>");
    html.push_str(&format!(
        r#"<input type="hidden" name="__VIEWSTATE" value="{}"/>"#,
        "A".repeat(40_000)
    ));
    html.push_str(&format!(r#"<span id="{ID_MONTH_HEADING}">October 2024</span><table>"#));
    for pos in 1..=42u32 {
        if pos % 7 == 1 {
            html.push_str("<tr>");
        }
        if pos == 1 || pos > 33 {
            html.push_str("<td class=\"pad\"></td>");
        } else {
            html.push_str(&format!(
                r#"<td id="{}"><a href="javascript:void(0)">{pos}</a><div>D1(0700-1500)&nbsp;N2(2200-0600)</div></td>"#,
                month::cell_id(pos)
            ));
        }
        if pos % 7 == 0 {
            html.push_str("</tr>");
        }
    }
    html.push_str("</table></form></body></html>");
    html
}

fn bench_extract(c: &mut Criterion) {
    let doc = Document::new(sample_page());

    c.bench_function("month_extract", |b| {
        b.iter(|| {
            let m = month::extract(black_box(&doc)).ok();
            black_box(m.map(|m| m.days.len()))
        })
    });

    c.bench_function("month_label", |b| {
        b.iter(|| black_box(month::month_label(black_box(&doc))))
    });

    c.bench_function("postback_tokens", |b| {
        b.iter(|| black_box(PostbackTokens::from_document(black_box(&doc))))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
