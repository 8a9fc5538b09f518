//! Terminal and HTML output for a [`RenderPlan`].

use std::fmt::Write as _;

use client_core::{MarkdownBlock, RenderPlan, SourceCard};

pub fn text(plan: &RenderPlan) -> String {
    let mut out = String::new();
    if let Some(message) = &plan.error {
        let _ = writeln!(out, "{message}");
    }
    let Some(answer) = &plan.answer else {
        return out;
    };

    let _ = writeln!(out, "Response:\n");
    for block in &answer.narrative.blocks {
        write_block(&mut out, block);
    }

    let _ = writeln!(out, "\n{}", answer.sources_heading);
    for card in &answer.sources {
        write_card(&mut out, card);
    }
    out
}

fn write_block(out: &mut String, block: &MarkdownBlock) {
    let _ = match block {
        MarkdownBlock::Heading { level, text } => {
            writeln!(out, "{} {text}\n", "#".repeat(usize::from(*level)))
        }
        MarkdownBlock::Paragraph(text) => writeln!(out, "{text}\n"),
        MarkdownBlock::ListItem {
            depth,
            ordinal,
            text,
        } => {
            let indent = "  ".repeat(*depth);
            match ordinal {
                Some(n) => writeln!(out, "{indent}{n}. {text}"),
                None => writeln!(out, "{indent}- {text}"),
            }
        }
        MarkdownBlock::CodeBlock(code) => {
            for line in code.lines() {
                let _ = writeln!(out, "    {line}");
            }
            writeln!(out)
        }
        MarkdownBlock::Quote(text) => writeln!(out, "> {text}\n"),
        MarkdownBlock::Rule => writeln!(out, "---\n"),
    };
}

fn write_card(out: &mut String, card: &SourceCard) {
    let chips: Vec<String> = card.tags.iter().map(|tag| format!("[{tag}]")).collect();
    let _ = writeln!(out, "  {}. {}", card.rank, card.caption);
    if !chips.is_empty() {
        let _ = writeln!(out, "     {}", chips.join(" "));
    }
    if !card.location.is_empty() {
        let _ = writeln!(out, "     Location: {}", card.location);
    }
    if let Some(url) = &card.image_url {
        let _ = writeln!(out, "     Image: {url}");
    }
}

pub fn html(plan: &RenderPlan) -> String {
    let mut out = String::new();
    if let Some(message) = &plan.error {
        let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(message));
    }
    let Some(answer) = &plan.answer else {
        return out;
    };

    out.push_str("<section class=\"answer\">\n<h2>Response:</h2>\n");
    out.push_str(&answer.narrative.html);
    let _ = writeln!(out, "<h2>Sources ({}):</h2>", answer.sources.len());
    for card in &answer.sources {
        out.push_str("<div class=\"source\">\n");
        if let Some(url) = &card.image_url {
            let _ = writeln!(
                out,
                "<img src=\"{}\" width=\"300\" height=\"300\" alt=\"{}\">",
                escape(url),
                escape(&card.image_id)
            );
        }
        let _ = writeln!(out, "<p>{}</p>", escape(&card.caption));
        for tag in &card.tags {
            let _ = writeln!(out, "<span class=\"tag\">{}</span>", escape(tag));
        }
        if !card.location.is_empty() {
            let _ = writeln!(out, "<p class=\"location\">{}</p>", escape(&card.location));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    use client_core::{AnswerPayload, AskStatus, Presenter, QueryState, SourceRecord};

    fn plan_for(status: AskStatus) -> RenderPlan {
        let presenter = Presenter::new("http://localhost:5000/images".parse().expect("url"));
        presenter.present(&QueryState {
            status,
            ..QueryState::default()
        })
    }

    fn answered() -> RenderPlan {
        plan_for(AskStatus::Succeeded(AnswerPayload {
            narrative: "## Findings\n1. Flooded underpass\n2. Broken <curb>".to_string(),
            sources: vec![
                SourceRecord {
                    image_id: "img-1".to_string(),
                    image_path: "data/images/underpass.jpg".to_string(),
                    caption: "Water pooling under an overpass".to_string(),
                    tags: vec!["flood".to_string(), "road".to_string()],
                    location: "Marikina".to_string(),
                },
                SourceRecord::default(),
            ],
        }))
    }

    #[test]
    fn text_lists_narrative_and_cards_in_order() {
        let out = text(&answered());
        assert!(out.starts_with("Response:\n"));
        assert!(out.contains("## Findings\n"));
        assert!(out.contains("1. Flooded underpass\n"));
        assert!(out.contains("Sources (2):\n"));
        assert!(out.contains("  1. Water pooling under an overpass\n     [flood] [road]\n"));
        assert!(out.contains("Location: Marikina"));
        assert!(out.contains("Image: http://localhost:5000/images/underpass.jpg"));
        assert!(out.contains("  2. \n"));
    }

    #[test]
    fn html_escapes_record_text() {
        let out = html(&answered());
        assert!(out.contains("<h2>Findings</h2>"));
        assert!(out.contains("Broken &lt;curb&gt;"));
        assert!(out.contains("<h2>Sources (2):</h2>"));
        assert!(out.contains("<span class=\"tag\">flood</span>"));
        assert!(out.contains("src=\"http://localhost:5000/images/underpass.jpg\""));
        assert_eq!(out.matches("<div class=\"source\">").count(), 2);
        assert_eq!(out.matches("<img ").count(), 1);
    }

    #[test]
    fn failure_and_idle_plans() {
        let failed = plan_for(AskStatus::Failed("Please enter a question.".to_string()));
        assert_eq!(text(&failed), "Please enter a question.\n");
        assert_eq!(html(&failed), "<p class=\"error\">Please enter a question.</p>\n");

        let idle = plan_for(AskStatus::Idle);
        assert!(text(&idle).is_empty());
        assert!(html(&idle).is_empty());
    }
}
