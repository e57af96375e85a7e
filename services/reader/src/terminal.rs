//! services/reader/src/terminal.rs
//!
//! Plain-text presentation of reader snapshots and story listings.

use crate::reader::{ReaderView, SlideBody, SlideView};
use html_escape::decode_html_entities;
use lol_html::{doc_text, element, html_content::TextType, rewrite_str, RewriteStrSettings};
use std::{cell::RefCell, rc::Rc};
use story_reader_core::{
    domain::StoryCollection,
    layout::{LayoutVariant, PageArrangement},
    ports::CollectionKind,
};
use tracing::warn;

pub const HELP: &str = "Komutlar: n(ext) | p(rev) | g <sayfa> | like | dislike | b(ack) | r(etry) | q(uit)";

pub fn render_view(view: &ReaderView) -> String {
    match view {
        ReaderView::Idle => String::new(),
        ReaderView::Loading => "Yükleniyor...\n".to_string(),
        ReaderView::Failed { message } => {
            format!("Hata\n{}\n[r] Tekrar Dene\n", message)
        }
        ReaderView::Ready(slide) => render_slide(slide),
    }
}

fn render_slide(view: &SlideView) -> String {
    let mut out = format!("== {} ==\n", view.title);
    out.push_str(&header_line(view));
    if let Some(cover) = &view.cover {
        out.push_str(&format!("Kapak: {}\n", cover.src()));
    }
    out.push('\n');

    match &view.body {
        SlideBody::Page {
            number,
            arrangement,
            ..
        } => {
            out.push_str(&render_arrangement(arrangement));
            out.push_str(&format!("{:>40}\n", format!("- {} -", number)));
        }
        SlideBody::Feedback { enabled } => {
            out.push_str("Bu hikayeyi beğendin mi?\n");
            out.push_str(if *enabled {
                "[like] Beğendim    [dislike] Beğenmedim\n"
            } else {
                "Gönderiliyor...\n"
            });
        }
    }

    let dots: String = view
        .dots
        .iter()
        .map(|active| if *active { '●' } else { '○' })
        .collect();
    out.push_str(&format!(
        "\n{} {} {} {}\n",
        if view.can_go_prev { "<" } else { " " },
        dots,
        if view.can_go_next { ">" } else { " " },
        view.progress.label()
    ));
    out
}

/// Metadata shown under the title, like the cover card of the web reader.
fn header_line(view: &SlideView) -> String {
    let mut meta = Vec::new();
    if let Some(category) = &view.category {
        meta.push(format!("Kategori: {}", category));
    }
    if let Some(age) = &view.age_group {
        meta.push(format!("Yaş: {}", age));
    }
    if !view.tags.is_empty() {
        meta.push(format!("Etiketler: {}", view.tags.join(", ")));
    }
    meta.push(format!("♥ {}", view.likes));
    if let Some(minutes) = view.read_time {
        meta.push(format!("Okuma: {} dk", minutes));
    }
    format!("{}\n", meta.join(" | "))
}

fn render_arrangement(arrangement: &PageArrangement) -> String {
    match arrangement {
        PageArrangement::Dual {
            variant,
            text,
            image,
        } => {
            let picture = format!("[resim: {}]", image.src());
            let (first, second) = match variant {
                LayoutVariant::ImageLeftTextRight | LayoutVariant::ImageTopTextBottom => {
                    (picture, text.clone())
                }
                LayoutVariant::TextLeftImageRight | LayoutVariant::TextTopImageBottom => {
                    (text.clone(), picture)
                }
            };
            let separator = match variant {
                LayoutVariant::ImageLeftTextRight | LayoutVariant::TextLeftImageRight => " | ",
                _ => "\n\n",
            };
            format!("{}{}{}\n", first, separator, second)
        }
        PageArrangement::TextOnly { text } => format!("{}\n", text),
        PageArrangement::ImageOnly { image } => format!("[resim: {}]\n", image.src()),
        PageArrangement::Html { html } => format!("{}\n", html_to_text(html)),
        PageArrangement::Empty => String::new(),
    }
}

/// Flattens a legacy HTML page to text, keeping block breaks as newlines.
///
/// Script and style bodies are dropped; entities are decoded once the
/// whole document has been collected, so chunk boundaries never split one.
pub fn html_to_text(html: &str) -> String {
    let collected = Rc::new(RefCell::new(String::with_capacity(html.len())));

    let rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!(
                "p, br, div, li, h1, h2, h3, h4, h5, h6, blockquote",
                {
                    let collected = Rc::clone(&collected);
                    move |_| {
                        collected.borrow_mut().push('\n');
                        Ok(())
                    }
                }
            )],
            // Document-level so text outside any element is kept too.
            document_content_handlers: vec![doc_text!({
                let collected = Rc::clone(&collected);
                move |t| {
                    if matches!(t.text_type(), TextType::Data) {
                        collected.borrow_mut().push_str(t.as_str());
                    }
                    Ok(())
                }
            })],
            ..RewriteStrSettings::default()
        },
    );
    if let Err(err) = rewritten {
        warn!("Could not flatten legacy HTML page: {}", err);
        return html.trim().to_string();
    }

    let raw = collected.take();
    let decoded = decode_html_entities(&raw);
    let lines: Vec<&str> = decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

pub fn render_collection(kind: CollectionKind, collection: &StoryCollection) -> String {
    let heading = match kind {
        CollectionKind::Featured => "Öne Çıkan Hikayeler",
        CollectionKind::New => "Yeni Hikayeler",
        CollectionKind::Popular => "Popüler Hikayeler",
    };

    let mut out = format!("{} ({})\n", heading, collection.total);
    for story in &collection.stories {
        let category = story
            .category
            .as_ref()
            .map(|category| format!(" [{}]", category))
            .unwrap_or_default();
        out.push_str(&format!(
            "#{:<6} {}{} ♥ {}\n",
            story.id.to_string(),
            story.title,
            category,
            story.likes
        ));
    }
    out
}
