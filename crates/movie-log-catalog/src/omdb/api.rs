use movie_log_models::{MovieDetail, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SummaryRecord>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryRecord {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

/// Years arrive as strings: "2010" for movies, "2010–2013" for series.
fn parse_year(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Runtimes arrive as "148 min"; "N/A" and anything unparseable become None.
fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

fn parse_rating(raw: &str) -> Option<f64> {
    raw.parse().ok()
}

/// Search the catalog by free text.
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<MovieSummary>, CatalogError> {
    let url = format!(
        "{}/?apikey={}&s={}",
        base_url,
        api_key,
        urlencoding::encode(query)
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::HttpStatus(response.status().as_u16()));
    }

    let body: SearchResponse = response.json().await?;
    summaries_from_response(body)
}

/// Fetch the full record for one title by id.
pub async fn detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, CatalogError> {
    let url = format!(
        "{}/?apikey={}&i={}",
        base_url,
        api_key,
        urlencoding::encode(imdb_id)
    );

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(CatalogError::HttpStatus(response.status().as_u16()));
    }

    let body: DetailResponse = response.json().await?;
    detail_from_response(body)
}

fn summaries_from_response(body: SearchResponse) -> Result<Vec<MovieSummary>, CatalogError> {
    // The catalog signals "no matches" in-band with Response: "False".
    if body.response.eq_ignore_ascii_case("false") {
        debug!("Catalog search returned no matches: {:?}", body.error);
        return Err(CatalogError::NotFound);
    }

    Ok(body
        .search
        .into_iter()
        .map(|record| MovieSummary {
            imdb_id: record.imdb_id,
            title: record.title,
            year: parse_year(&record.year),
            poster_url: record.poster,
        })
        .collect())
}

fn detail_from_response(body: DetailResponse) -> Result<MovieDetail, CatalogError> {
    if body.response.eq_ignore_ascii_case("false") {
        debug!("Catalog detail lookup failed: {:?}", body.error);
        return Err(CatalogError::NotFound);
    }

    Ok(MovieDetail {
        imdb_id: body.imdb_id,
        title: body.title,
        year: parse_year(&body.year),
        poster_url: body.poster,
        runtime_minutes: parse_runtime_minutes(&body.runtime),
        imdb_rating: parse_rating(&body.imdb_rating),
        plot: body.plot,
        released: body.released,
        actors: body.actors,
        director: body.director,
        genre: body.genre,
    })
}
