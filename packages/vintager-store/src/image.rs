//! Responsive image URLs for files in the store's object storage.
//!
//! Public object URLs (`/storage/v1/object/...`) are rewritten to the render endpoint
//! (`/storage/v1/render/image/...`), which accepts `width` and `quality` query parameters. Leaving
//! `format` unset lets the endpoint negotiate WebP. Anything that is not a storage URL is passed
//! through untouched.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::Serialize;

const OBJECT_PREFIX: &str = "/storage/v1/object";
const RENDER_PREFIX: &str = "/storage/v1/render/image";

static STORAGE_URL: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"supabase\.co/(?:.+/)?storage/").ok());

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResponsiveImage {
	pub src: String,
	pub srcset: Option<String>,
	pub sizes: Option<String>,
}
impl ResponsiveImage {
	fn plain(src: &str) -> Self {
		Self { src: src.to_string(), srcset: None, sizes: None }
	}
}

/// Builds the `src`/`srcset` pair for an item image. Blank sources use the configured fallback.
pub fn responsive_image(
	src: Option<&str>,
	sizes: &str,
	cfg: &vintager_config::Catalog,
) -> ResponsiveImage {
	let src = src.map(str::trim).filter(|src| !src.is_empty()).unwrap_or(&cfg.fallback_image);
	let Ok(url) = Url::parse(src) else {
		return ResponsiveImage::plain(src);
	};

	if !is_storage_url(url.as_str()) {
		return ResponsiveImage::plain(src);
	}

	let base = render_base(&url).unwrap_or(url);
	let quality = cfg.image_quality.to_string();
	let Some(largest) = cfg.image_widths.iter().max() else {
		return ResponsiveImage::plain(src);
	};
	let srcset = cfg
		.image_widths
		.iter()
		.map(|width| format!("{} {width}w", sized(&base, *width, &quality)))
		.collect::<Vec<_>>()
		.join(", ");

	ResponsiveImage {
		src: sized(&base, *largest, &quality).to_string(),
		srcset: Some(srcset),
		sizes: Some(sizes.to_string()),
	}
}

fn is_storage_url(href: &str) -> bool {
	STORAGE_URL.as_ref().map(|re| re.is_match(href)).unwrap_or(false)
}

fn render_base(url: &Url) -> Option<Url> {
	let path = url.path();
	let index = path.find(&format!("{OBJECT_PREFIX}/"))?;
	let rest = &path[index + OBJECT_PREFIX.len()..];
	let mut base = url.clone();
	base.set_path(&format!("{RENDER_PREFIX}{rest}"));
	base.set_query(None);
	base.set_fragment(None);

	Some(base)
}

fn sized(base: &Url, width: u32, quality: &str) -> Url {
	let overridden = ["width", "quality"];
	let kept: Vec<(String, String)> = base
		.query_pairs()
		.filter(|(key, _)| !overridden.contains(&&**key))
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect();
	let mut url = base.clone();
	url.set_query(None);
	url.query_pairs_mut()
		.extend_pairs(kept)
		.append_pair("width", &width.to_string())
		.append_pair("quality", quality);

	url
}
