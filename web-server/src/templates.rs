use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub airlines: Vec<String>,
    pub countries: Vec<String>,
}
