// ABOUTME: Template registry combining the shared layout with page templates, keyed by page name.
// ABOUTME: Built once at startup from a template source; renders pages wrapped in a PageEnvelope.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use hydraweb_core::{PageEnvelope, markdown_to_html};
use serde::Serialize;
use tera::{Context, Tera, Value};
use thiserror::Error;

/// Registry name of the shared layout.
pub const LAYOUT: &str = "layout.html";

/// Registry name of the shared login page.
pub const LOGIN_PAGE: &str = "login.html";

const SHARED_LAYOUT: &str = include_str!("../templates/layout.html");
const SHARED_LOGIN: &str = include_str!("../templates/login.html");

/// Errors raised while building the registry or rendering a page.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("compiling templates: {0}")]
    Compile(#[source] tera::Error),

    #[error("template not found: {0}")]
    NotFound(String),

    #[error("rendering {name}: {source}")]
    Render { name: String, source: tera::Error },
}

/// A filesystem-like resource that page templates are read from.
pub trait TemplateSource {
    fn read(&self, path: &str) -> std::io::Result<String>;
}

/// Reads templates from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirSource {
    fn read(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.root.join(path))
    }
}

/// Serves templates from memory, typically filled with `include_str!` output.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl TemplateSource for MemorySource {
    fn read(&self, path: &str) -> std::io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no such template: {path}"))
        })
    }
}

type Extension = Box<dyn FnOnce(&mut Tera)>;

/// Collects the page list and template extensions for a [`Renderer`].
pub struct RendererBuilder<'a> {
    source: &'a dyn TemplateSource,
    dir: String,
    pages: Vec<String>,
    extensions: Vec<Extension>,
}

impl<'a> RendererBuilder<'a> {
    /// Directory inside the source that page files live in, e.g. "templates".
    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn page(mut self, name: impl Into<String>) -> Self {
        self.pages.push(name.into());
        self
    }

    pub fn pages<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.extend(names.into_iter().map(Into::into));
        self
    }

    /// Register a custom template function.
    pub fn function<F>(mut self, name: &str, function: F) -> Self
    where
        F: tera::Function + 'static,
    {
        let name = name.to_string();
        self.extensions
            .push(Box::new(move |tera: &mut Tera| tera.register_function(&name, function)));
        self
    }

    /// Register a custom template filter.
    pub fn filter<F>(mut self, name: &str, filter: F) -> Self
    where
        F: tera::Filter + 'static,
    {
        let name = name.to_string();
        self.extensions
            .push(Box::new(move |tera: &mut Tera| tera.register_filter(&name, filter)));
        self
    }

    /// Read every template and compile the registry.
    ///
    /// Each page is compiled as the shared layout plus the page's blocks and
    /// registered under its file name. A project page named `login.html`
    /// replaces the shared login page.
    pub fn build(self) -> Result<Renderer, TemplateError> {
        let mut tera = Tera::default();
        // Escape every page regardless of its file extension.
        tera.autoescape_on(vec![""]);
        tera.set_escape_fn(escape_html);
        tera.register_filter("markdown", markdown_filter);
        for extend in self.extensions {
            extend(&mut tera);
        }

        let mut sources = vec![
            (LAYOUT.to_string(), SHARED_LAYOUT.to_string()),
            (LOGIN_PAGE.to_string(), compose(SHARED_LOGIN)),
        ];
        let mut pages = HashSet::from([LOGIN_PAGE.to_string()]);

        for page in self.pages {
            let path = page_path(&self.dir, &page);
            let contents = self
                .source
                .read(&path)
                .map_err(|source| TemplateError::Read { path, source })?;
            sources.push((page.clone(), compose(&contents)));
            pages.insert(page);
        }

        tera.add_raw_templates(sources)
            .map_err(TemplateError::Compile)?;

        tracing::debug!(pages = pages.len(), "template registry built");
        Ok(Renderer { tera, pages })
    }
}

/// Immutable registry of compiled page templates.
pub struct Renderer {
    tera: Tera,
    pages: HashSet<String>,
}

impl Renderer {
    /// Start building a registry whose project pages are read from `source`.
    pub fn builder(source: &dyn TemplateSource) -> RendererBuilder<'_> {
        RendererBuilder {
            source,
            dir: String::new(),
            pages: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// True iff `name` was registered as a page.
    pub fn has_page(&self, name: &str) -> bool {
        self.pages.contains(name)
    }

    /// Render the page registered as `name` against `envelope`.
    ///
    /// Names are matched exactly; an unknown name fails before any template
    /// is executed.
    pub fn render<T: Serialize>(
        &self,
        name: &str,
        envelope: &PageEnvelope<'_, T>,
    ) -> Result<String, TemplateError> {
        if !self.has_page(name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }

        let render_error = |source| TemplateError::Render {
            name: name.to_string(),
            source,
        };
        let context = Context::from_serialize(envelope).map_err(render_error)?;
        self.tera.render(name, &context).map_err(render_error)
    }
}

fn compose(page: &str) -> String {
    format!("{{% extends \"{LAYOUT}\" %}}\n{page}")
}

fn page_path(dir: &str, page: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        page.to_string()
    } else {
        format!("{dir}/{page}")
    }
}

/// Tera's HTML escaping with `/` left alone so paths in `href` stay readable.
fn escape_html(input: &str) -> String {
    tera::escape_html(input).replace("&#x2F;", "/")
}

fn markdown_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = tera::try_get_value!("markdown", "value", String, value);
    Ok(Value::String(markdown_to_html(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydraweb_core::{Brand, NavLink};

    fn two_page_source() -> MemorySource {
        MemorySource::new()
            .with("pages/a.html", "{% block content %}<p>page A: {{ data.name }}</p>{% endblock content %}")
            .with("pages/b.html", "{% block content %}<p>page B</p>{% endblock content %}")
    }

    fn two_page_renderer() -> Renderer {
        Renderer::builder(&two_page_source())
            .dir("pages")
            .pages(["a.html", "b.html"])
            .build()
            .unwrap()
    }

    #[derive(Serialize)]
    struct Named {
        name: &'static str,
    }

    #[test]
    fn render_selects_exactly_the_named_page() {
        let renderer = two_page_renderer();
        let brand = Brand::new("Hydra", "Web");
        let envelope = PageEnvelope::new(&brand, &[], Named { name: "alpha" });

        let html = renderer.render("a.html", &envelope).unwrap();
        assert!(html.contains("page A: alpha"));
        assert!(!html.contains("page B"));

        let html = renderer.render("b.html", &envelope).unwrap();
        assert!(html.contains("page B"));
        assert!(!html.contains("page A"));
    }

    #[test]
    fn render_unknown_page_is_not_found() {
        let renderer = two_page_renderer();
        let brand = Brand::new("Hydra", "Web");
        let envelope = PageEnvelope::new(&brand, &[], ());

        for name in ["c.html", "A.html", "a", "pages/a.html", LAYOUT] {
            let err = renderer.render(name, &envelope).unwrap_err();
            assert!(matches!(err, TemplateError::NotFound(ref n) if n == name));
        }
    }

    #[test]
    fn login_page_is_always_registered() {
        let renderer = Renderer::builder(&MemorySource::new()).build().unwrap();
        assert!(renderer.has_page(LOGIN_PAGE));
        assert!(!renderer.has_page(LAYOUT));

        let brand = Brand::new("Hydra", "Web");
        let envelope = PageEnvelope::new(&brand, &[], ()).error(Some("Invalid token"));
        let html = renderer.render(LOGIN_PAGE, &envelope).unwrap();
        assert!(html.contains("<title>HydraWeb</title>"));
        assert!(html.contains("name=\"token\""));
        assert!(html.contains("Invalid token"));
    }

    #[test]
    fn layout_shows_nav_only_when_logged_in() {
        let renderer = two_page_renderer();
        let brand = Brand::new("Hydra", "Web");
        let nav = vec![NavLink::new("Dashboard", "/admin"), NavLink::new("Docs", "/docs")];
        let data = Named { name: "x" };

        let html = renderer
            .render("a.html", &PageEnvelope::new(&brand, &nav, &data).logged_in(true))
            .unwrap();
        assert!(html.contains("href=\"/admin\">Dashboard</a>"));
        assert!(html.find("Dashboard").unwrap() < html.find("Docs").unwrap());
        assert!(html.contains("action=\"/logout\""));

        let html = renderer
            .render("a.html", &PageEnvelope::new(&brand, &nav, &data))
            .unwrap();
        assert!(!html.contains("Dashboard"));
        assert!(!html.contains("/logout"));
    }

    #[test]
    fn page_data_is_escaped() {
        let renderer = two_page_renderer();
        let brand = Brand::new("Hydra", "Web");
        let envelope = PageEnvelope::new(&brand, &[], Named { name: "<script>" });
        let html = renderer.render("a.html", &envelope).unwrap();
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn missing_page_file_fails_build() {
        let result = Renderer::builder(&two_page_source())
            .dir("pages")
            .page("missing.html")
            .build();
        match result {
            Err(TemplateError::Read { path, .. }) => assert_eq!(path, "pages/missing.html"),
            Err(other) => panic!("expected read error, got {other}"),
            Ok(_) => panic!("expected read error"),
        }
    }

    #[test]
    fn malformed_page_fails_build() {
        let source = MemorySource::new().with("broken.html", "{% block content %}{{ unclosed {% endblock content %}");
        let result = Renderer::builder(&source).page("broken.html").build();
        assert!(matches!(result, Err(TemplateError::Compile(_))));
    }

    #[test]
    fn custom_functions_and_filters_are_available() {
        let source = MemorySource::new().with(
            "fn.html",
            "{% block content %}{{ version() }}|{{ \"abc\" | shout }}{% endblock content %}",
        );
        let renderer = Renderer::builder(&source)
            .page("fn.html")
            .function("version", |_: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::from("1.2.3"))
            })
            .filter("shout", |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
                let s = tera::try_get_value!("shout", "value", String, value);
                Ok(Value::String(s.to_uppercase()))
            })
            .build()
            .unwrap();

        let brand = Brand::new("Hydra", "Web");
        let html = renderer.render("fn.html", &PageEnvelope::new(&brand, &[], ())).unwrap();
        assert!(html.contains("1.2.3|ABC"));
    }

    #[test]
    fn markdown_filter_renders_html() {
        let source = MemorySource::new().with(
            "md.html",
            "{% block content %}{{ data | markdown | safe }}{% endblock content %}",
        );
        let renderer = Renderer::builder(&source).page("md.html").build().unwrap();
        let brand = Brand::new("Hydra", "Web");
        let envelope = PageEnvelope::new(&brand, &[], "| a |\n|---|\n| 1 |\n");
        let html = renderer.render("md.html", &envelope).unwrap();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn dir_source_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        std::fs::write(
            dir.path().join("templates/admin.html"),
            "{% block content %}<h1>Admin home</h1>{% endblock content %}",
        )
        .unwrap();

        let source = DirSource::new(dir.path());
        let renderer = Renderer::builder(&source)
            .dir("templates/")
            .page("admin.html")
            .build()
            .unwrap();

        let brand = Brand::new("Hydra", "Web");
        let html = renderer.render("admin.html", &PageEnvelope::new(&brand, &[], ())).unwrap();
        assert!(html.contains("<h1>Admin home</h1>"));
    }

    #[test]
    fn pages_without_html_extension_are_escaped() {
        let source = MemorySource::new()
            .with("dashboard", "{% block content %}{{ data.name }}{% endblock content %}")
            .with("x.tmpl", "{% block content %}{{ data.name }}{% endblock content %}");
        let renderer = Renderer::builder(&source)
            .pages(["dashboard", "x.tmpl"])
            .build()
            .unwrap();
        let brand = Brand::new("Hydra", "Web");
        let envelope = PageEnvelope::new(&brand, &[], Named { name: "<script>x</script>" });

        for page in ["dashboard", "x.tmpl"] {
            let html = renderer.render(page, &envelope).unwrap();
            assert!(!html.contains("<script>"), "{page} rendered raw script");
            assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        }
    }

    #[test]
    fn project_login_page_replaces_shared_one() {
        let source = MemorySource::new().with(
            "login.html",
            "{% block content %}<form method=\"post\"><input name=\"passphrase\"></form>{% endblock content %}",
        );
        let renderer = Renderer::builder(&source).page(LOGIN_PAGE).build().unwrap();
        let brand = Brand::new("Hydra", "Web");

        let html = renderer.render(LOGIN_PAGE, &PageEnvelope::new(&brand, &[], ())).unwrap();
        assert!(html.contains("name=\"passphrase\""));
        assert!(!html.contains("name=\"token\""));
        assert!(html.contains("<title>HydraWeb</title>"));
    }

    #[test]
    fn escape_html_keeps_slashes() {
        assert_eq!(escape_html("/admin/notes"), "/admin/notes");
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("&#x2F;"), "&amp;#x2F;");
    }

    #[test]
    fn page_path_joins_directory() {
        assert_eq!(page_path("templates", "a.html"), "templates/a.html");
        assert_eq!(page_path("templates/", "a.html"), "templates/a.html");
        assert_eq!(page_path("", "a.html"), "a.html");
    }
}
