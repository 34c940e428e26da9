use std::fmt::Write;

use super::page::{Card, Controls, Page, PageBody};

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Page {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, r#"<div class="container my-3 py-3">"#)?;
        writeln!(
            out,
            r#"<div class="row"><div class="col-12 text-center"><h2 class="display-5">{}</h2><hr /></div></div>"#,
            escape(self.heading)
        )?;
        writeln!(out, r#"<div class="row justify-content-center">"#)?;
        match &self.body {
            PageBody::Skeleton { blocks, height_px } => {
                for _ in 0..*blocks {
                    writeln!(
                        out,
                        r#"<div class="col-md-4 col-sm-6 col-12 mb-4"><div class="skeleton" style="height: {}px"></div></div>"#,
                        height_px
                    )?;
                }
            }
            PageBody::Failed { message } => {
                writeln!(
                    out,
                    r#"<div class="alert alert-danger text-center" role="alert"><p>{}</p><button class="btn btn-dark" data-action="retry">Retry</button></div>"#,
                    escape(message)
                )?;
            }
            PageBody::Grid { controls, cards } => {
                write_controls(out, controls)?;
                for card in cards {
                    write_card(out, card)?;
                }
            }
        }
        writeln!(out, "</div>")?;
        writeln!(out, "</div>")
    }
}

fn write_controls(out: &mut String, controls: &Controls) -> std::fmt::Result {
    writeln!(out, r#"<div class="d-flex flex-wrap justify-content-between align-items-center py-3">"#)?;
    writeln!(out, r#"<select class="form-select w-auto mb-2" data-action="sort">"#)?;
    for option in &controls.sort_options {
        writeln!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            option.value,
            if option.selected { " selected" } else { "" },
            escape(option.label)
        )?;
    }
    writeln!(out, "</select>")?;
    writeln!(out, "</div>")?;

    writeln!(out, r#"<div class="buttons text-center py-4">"#)?;
    for button in &controls.filters {
        writeln!(
            out,
            r#"<button class="btn btn-sm m-2 {}" data-action="filter" data-category="{}">{}</button>"#,
            if button.active { "btn-dark" } else { "btn-outline-dark" },
            escape(&button.value),
            escape(&button.caption)
        )?;
    }
    writeln!(out, "</div>")
}

fn write_card(out: &mut String, card: &Card) -> std::fmt::Result {
    let disabled = if card.add_to_cart_enabled() { "" } else { " disabled" };

    writeln!(out, r#"<div class="col-md-4 col-sm-6 col-12 mb-4 d-flex align-items-stretch">"#)?;
    writeln!(
        out,
        r#"<div class="card text-start h-100 shadow-sm" data-product-id="{}" style="opacity: {}">"#,
        card.product_id,
        card.opacity()
    )?;

    writeln!(out, r#"<div class="card-media">"#)?;
    writeln!(
        out,
        r#"<img class="card-img-top p-3" src="{}" alt="{}" height="250" />"#,
        escape(&card.image),
        escape(&card.image_alt)
    )?;
    if !card.in_stock {
        writeln!(out, r#"<span class="badge bg-danger out-of-stock">Out of Stock</span>"#)?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, r#"<div class="card-body">"#)?;
    writeln!(out, r#"<div class="d-flex justify-content-between">"#)?;
    write!(out, r#"<h5 class="card-title">"#)?;
    write_detail_link(out, card, "text-black text-decoration-none", &escape(&card.title))?;
    writeln!(out, "</h5>")?;
    writeln!(out, r#"<h5 class="fw-bold price-badge">{}</h5>"#, escape(&card.price))?;
    writeln!(out, "</div>")?;
    writeln!(
        out,
        r#"<p class="small">{} <i class="fa fa-star"></i></p>"#,
        escape(card.rating.as_deref().unwrap_or(""))
    )?;
    writeln!(out, r#"<p class="text-muted small">{}</p>"#, escape(&card.description))?;
    if let Some(selector) = &card.sizes {
        writeln!(
            out,
            r#"<select class="form-select mt-2"{}>"#,
            if selector.enabled { "" } else { " disabled" }
        )?;
        writeln!(out, "<option>Select Size</option>")?;
        for size in &selector.sizes {
            writeln!(out, "<option>{}</option>", size)?;
        }
        writeln!(out, "</select>")?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, r#"<div class="card-footer bg-transparent border-0 d-flex justify-content-center gap-2">"#)?;
    write_detail_link(out, card, "btn btn-sm btn-outline-dark", "See more")?;
    writeln!(out)?;
    writeln!(
        out,
        r#"<button class="btn btn-sm btn-dark" data-action="add-to-cart" data-product-id="{}"{}>+ Add to Cart</button>"#,
        card.product_id, disabled
    )?;
    writeln!(out, "</div>")?;

    writeln!(out, "</div>")?;
    writeln!(out, "</div>")
}

// Without an href the link cannot navigate.
fn write_detail_link(out: &mut String, card: &Card, class: &str, inner_html: &str) -> std::fmt::Result {
    match &card.detail_href {
        Some(href) => write!(out, r#"<a href="{}" class="{}">{}</a>"#, escape(href), class, inner_html),
        None => write!(
            out,
            r#"<a class="{} disabled" aria-disabled="true">{}</a>"#,
            class, inner_html
        ),
    }
}
