//! Server-side HTML rendering of the shopping list.
//!
//! The page is assembled from string fragments. Every stored value passes
//! through [`escape_html`] before it is written into markup.

use crate::domain::{ListedItem, QuantityAdjustment, ShoppingList};

const STYLESHEET: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
form.inline { display: inline; }
ul.items { list-style: none; padding: 0; }
ul.items li { display: flex; align-items: center; gap: .5rem; padding: .4rem .6rem; margin: .3rem 0; border-left: .4rem solid #999; border-radius: .2rem; }
ul.items li.purchased .name { text-decoration: line-through; opacity: .6; }
.name { flex: 1; }
.tag { font-size: .75rem; opacity: .8; }
.cat-frutas { border-color: #e74c3c; }
.cat-verduras { border-color: #27ae60; }
.cat-laticinios { border-color: #f1c40f; }
.cat-carnes { border-color: #c0392b; }
.cat-peixes { border-color: #2980b9; }
.cat-padaria { border-color: #d35400; }
.cat-congelados { border-color: #5dade2; }
.cat-mercearia { border-color: #a0522d; }
.cat-bebidas { border-color: #8e44ad; }
.cat-limpeza { border-color: #16a085; }
.cat-higiene { border-color: #ff69b4; }
.cat-outros { border-color: #7f8c8d; }
"#;

/// Escape text for inclusion in HTML element content or quoted attributes.
///
/// # Examples
/// ```
/// use shopping_list::inbound::http::view::escape_html;
///
/// assert_eq!(escape_html("<b>Pão & Leite</b>"), "&lt;b&gt;Pão &amp; Leite&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn action_button(path: &str, label: &str, title: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{path}"><button type="submit" title="{title}">{label}</button></form>"#
    )
}

fn render_item(listed: &ListedItem) -> String {
    let item = &listed.item;
    let id = item.id;
    let state = if item.purchased { " purchased" } else { "" };
    let (toggle_label, toggle_title) = if item.purchased {
        ("↺", "Desmarcar")
    } else {
        ("✓", "Marcar como comprado")
    };

    let mut html = format!(
        r#"<li class="{class}{state}" data-id="{id}">"#,
        class = listed.color_class
    );
    html.push_str(&action_button(
        &format!("/toggle/{id}"),
        toggle_label,
        toggle_title,
    ));
    html.push_str(&format!(
        r#"<span class="name">{name}</span><span class="tag">{category}</span>"#,
        name = escape_html(&item.name),
        category = escape_html(&item.category),
    ));
    html.push_str(&action_button(
        &format!("/update/{id}?action={}", QuantityAdjustment::Decrease.as_str()),
        "−",
        "Diminuir",
    ));
    html.push_str(&format!(
        r#"<span class="quantity">{}</span>"#,
        item.quantity
    ));
    html.push_str(&action_button(
        &format!("/update/{id}?action={}", QuantityAdjustment::Increase.as_str()),
        "+",
        "Aumentar",
    ));
    html.push_str(&action_button(&format!("/delete/{id}"), "✕", "Remover"));
    html.push_str("</li>");
    html
}

fn render_section(title: &str, count: usize, items: &[ListedItem]) -> String {
    let mut html = format!("<section><h2>{title} ({count})</h2>");
    if items.is_empty() {
        html.push_str(r#"<p class="empty">Nenhum item.</p>"#);
    } else {
        html.push_str(r#"<ul class="items">"#);
        for listed in items {
            html.push_str(&render_item(listed));
        }
        html.push_str("</ul>");
    }
    html.push_str("</section>");
    html
}

fn render_create_form(categories: &[&'static str]) -> String {
    let mut html = String::from(
        r#"<form method="post" action="/add" class="create">
<input type="text" name="name" placeholder="Item" required>
<input type="number" name="quantity" value="1" min="1" required>
<select name="category" required>"#,
    );
    for label in categories {
        let label = escape_html(label);
        html.push_str(&format!(r#"<option value="{label}">{label}</option>"#));
    }
    html.push_str("</select>\n<button type=\"submit\">Adicionar</button>\n</form>");
    html
}

/// Render the complete list page.
pub fn render_shopping_list(list: &ShoppingList) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Lista de Compras</title>\n");
    html.push_str(&format!("<style>{STYLESHEET}</style>\n"));
    html.push_str("</head>\n<body>\n<h1>Lista de Compras</h1>\n");
    html.push_str(&render_create_form(&list.categories));
    html.push_str(&render_section(
        "Pendentes",
        list.pending_count(),
        &list.pending,
    ));
    html.push_str(&render_section(
        "Comprados",
        list.purchased_count(),
        &list.purchased,
    ));
    html.push_str("\n</body>\n</html>\n");
    html
}
