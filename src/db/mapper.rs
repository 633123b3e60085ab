use super::model::{Actor, Director, Movie, MovieRow};

const DEFAULT_RATING: f64 = 7.5;
const DEFAULT_RUNTIME: i64 = 120;
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_SYNOPSIS: &str = "No synopsis available";

/// Build the normalized movie document from a decoded result row.
/// Missing fields fall back to documented defaults; this never fails.
pub fn to_movie(row: MovieRow) -> Movie {
    let m = row.movie;

    let id = m.movie_id.unwrap_or_else(|| slugify(&m.title));
    let poster = m
        .poster
        .unwrap_or_else(|| placeholder_image(300, 450, &m.title));
    let backdrop = m
        .backdrop
        .unwrap_or_else(|| placeholder_image(1920, 1080, &m.title));

    let rating = row.avg_rating.map(round1).unwrap_or(DEFAULT_RATING);

    let synopsis = m
        .plot
        .or_else(|| m.tagline.clone())
        .unwrap_or_else(|| DEFAULT_SYNOPSIS.to_string());

    let release_date = m
        .released
        .map(|year| format!("{}-01-01", year))
        .unwrap_or_default();

    let language = m
        .languages
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let director = row.director.map(|p| Director {
        id: p.node_id.to_string(),
        name: p.name,
    });

    // Actor order is whatever the query collected; no re-sorting here.
    let actors = row
        .actors
        .into_iter()
        .map(|p| Actor {
            id: p.node_id.to_string(),
            name: p.name,
            role: p.role.unwrap_or_default(),
        })
        .collect();

    Movie {
        id,
        original_title: m.title.clone(),
        poster,
        backdrop,
        year: m.released,
        duration: m.runtime.unwrap_or(DEFAULT_RUNTIME),
        rating,
        synopsis,
        genres: Vec::new(),
        director,
        actors,
        trailer_url: None,
        budget: m.budget,
        revenue: m.revenue,
        release_date,
        language,
        tagline: m.tagline.unwrap_or_default(),
        title: m.title,
    }
}

/// Derive a catalog id from a title when the store has none:
/// lowercase, non-alphanumeric runs collapsed to single hyphens,
/// leading and trailing hyphens stripped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn placeholder_image(width: u32, height: u32, title: &str) -> String {
    format!(
        "https://placehold.co/{}x{}/1a1a1a/white?text={}",
        width,
        height,
        urlencoding::encode(title)
    )
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
