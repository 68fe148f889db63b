//! View rendering seam.
//!
//! Handlers describe *what* to render (a [`View`]: name + data context) and
//! the [`Renderer`] decides how the body is produced. The default backend
//! assembles HTML directly; any templating or serialization backend can stand
//! in behind the same trait.

use thiserror::Error;

use fauna_core::Animal;

/// A named view plus its data context.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Listing of the whole collection.
    Index { animals: Vec<Animal> },
    /// Blank creation form.
    New,
    /// Detail page for one animal.
    Show { animal: Animal },
    /// Pre-filled edit form for one animal.
    Edit { animal: Animal },
}

/// View rendering error.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Render(String),
}

/// Produce a response body for a view.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &View) -> Result<String, RenderError>;
}

/// Hand-assembled HTML backend.
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let (title, body) = match view {
            View::Index { animals } => ("All Animals".to_string(), index_body(animals)),
            View::New => ("New Animal".to_string(), form_body("/animals", None)),
            View::Show { animal } => (escape(&animal.fields.species), show_body(animal)),
            View::Edit { animal } => (
                format!("Edit {}", escape(&animal.fields.species)),
                form_body(&format!("/animals/{}?_method=PUT", animal.id), Some(animal)),
            ),
        };

        Ok(page(&title, &body))
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn index_body(animals: &[Animal]) -> String {
    let mut body = String::from("<h1>All Animals</h1>\n<ul>\n");
    for animal in animals {
        body.push_str(&format!(
            "<li><a href=\"/animals/{}\">{}</a> ({})</li>\n",
            animal.id,
            escape(&animal.fields.species),
            escape(&animal.fields.location),
        ));
    }
    body.push_str("</ul>\n<a href=\"/animals/new\">New Animal</a>\n");
    body
}

fn show_body(animal: &Animal) -> String {
    format!(
        concat!(
            "<h1>{species}</h1>\n",
            "<ul>\n",
            "<li>Location: {location}</li>\n",
            "<li>Extinct: {extinct}</li>\n",
            "<li>Life expectancy: {life} years</li>\n",
            "</ul>\n",
            "<a href=\"/animals/{id}/edit\">Edit</a>\n",
            "<form method=\"post\" action=\"/animals/{id}?_method=DELETE\">",
            "<input type=\"submit\" value=\"Delete\">",
            "</form>\n",
            "<a href=\"/animals\">Back to all animals</a>\n",
        ),
        species = escape(&animal.fields.species),
        location = escape(&animal.fields.location),
        extinct = animal.fields.extinct,
        life = animal.fields.life_expectancy,
        id = animal.id,
    )
}

fn form_body(action: &str, existing: Option<&Animal>) -> String {
    let species = existing.map(|a| escape(&a.fields.species)).unwrap_or_default();
    let location = existing.map(|a| escape(&a.fields.location)).unwrap_or_default();
    let life = existing
        .map(|a| a.fields.life_expectancy.to_string())
        .unwrap_or_default();
    let checked = match existing {
        Some(a) if a.fields.extinct => " checked",
        _ => "",
    };
    let submit = if existing.is_some() { "Save Changes" } else { "Create Animal" };

    format!(
        concat!(
            "<form method=\"post\" action=\"{action}\">\n",
            "<label>Species <input type=\"text\" name=\"species\" value=\"{species}\"></label>\n",
            "<label>Location <input type=\"text\" name=\"location\" value=\"{location}\"></label>\n",
            "<label>Extinct <input type=\"checkbox\" name=\"extinct\"{checked}></label>\n",
            "<label>Life Expectancy <input type=\"number\" name=\"lifeExpectancy\" step=\"any\" value=\"{life}\"></label>\n",
            "<input type=\"submit\" value=\"{submit}\">\n",
            "</form>\n",
            "<a href=\"/animals\">Back to all animals</a>\n",
        ),
        action = action,
        species = species,
        location = location,
        checked = checked,
        life = life,
        submit = submit,
    )
}

/// Escape text for interpolation into HTML bodies and attribute values.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
