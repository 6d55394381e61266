//! Where media files live inside the store.
//!
//! - avatars: `users_media/profile_pics/user_<id>/<filename>`
//! - recipe photos: `users_media/upload/user_<id>/<YYYY-MM-DD>/<stem>.jpg`
//! - derived thumbnails: `CACHE/thumbnails/<photo path>`

use chrono::NaiveDate;

/// Shared avatar assigned to new profiles. Not owned by any profile.
pub const DEFAULT_AVATAR: &str = "avatar_default.jpg";

const THUMBNAIL_PREFIX: &str = "CACHE/thumbnails/";
const RECIPE_UPLOAD_PREFIX: &str = "users_media/upload/";

pub fn avatar_path(user_id: i32, filename: &str) -> String {
    format!(
        "users_media/profile_pics/user_{user_id}/{}",
        sanitize_filename(filename)
    )
}

/// Recipe photos are always re-encoded as JPEG, so the extension is forced.
pub fn recipe_image_path(author_id: i32, date: NaiveDate, filename: &str) -> String {
    let sanitized = sanitize_filename(filename);
    let stem = match sanitized.rfind('.') {
        Some(pos) if pos > 0 => &sanitized[..pos],
        _ => sanitized.as_str(),
    };
    format!(
        "{RECIPE_UPLOAD_PREFIX}user_{author_id}/{}/{stem}.jpg",
        date.format("%Y-%m-%d")
    )
}

pub fn thumbnail_path(image_path: &str) -> String {
    format!("{THUMBNAIL_PREFIX}{image_path}")
}

/// Whether `path` lies under the recipe photo tree. Only those photos get
/// thumbnails.
pub fn is_recipe_image(path: &str) -> bool {
    path.strip_prefix(RECIPE_UPLOAD_PREFIX)
        .is_some_and(|rest| !rest.is_empty())
}

/// Inverse of [`thumbnail_path`]. `None` unless the source is a recipe
/// photo.
pub fn thumbnail_source(path: &str) -> Option<&str> {
    path.strip_prefix(THUMBNAIL_PREFIX)
        .filter(|source| is_recipe_image(source))
}

/// Case-insensitive extension check against a list like `["jpg", "png"]`.
pub fn has_extension(path: &str, extensions: &[&str]) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => extensions
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        _ => false,
    }
}

/// Reduce an uploaded filename to a safe flat name.
///
/// Whitespace becomes `_`, anything outside `[A-Za-z0-9._-]` is dropped,
/// leading dots are stripped. The stem falls back to `image` when nothing
/// survives.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let (stem, ext) = match base.rfind('.') {
        Some(pos) => (&base[..pos], &base[pos + 1..]),
        None => (base, ""),
    };

    let stem: String = stem
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => Some(c),
            _ => None,
        })
        .collect();
    let stem = match stem.trim_start_matches('.') {
        "" => "image",
        s => s,
    };
    let ext: String = ext.chars().filter(|c| c.is_ascii_alphanumeric()).collect();

    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{ext}")
    }
}

/// Checks if a path string contains path traversal patterns.
pub fn contains_path_traversal(path: &str) -> bool {
    path == ".."
        || path.starts_with("../")
        || path.contains("/../")
        || path.ends_with("/..")
        || path.starts_with("..\\")
        || path.contains("\\..\\")
        || path.ends_with("\\..")
}

/// Validates a relative media path before it touches the filesystem.
pub fn validate_media_path(path: &str) -> Result<&str, &'static str> {
    if path.is_empty() {
        return Err("Path cannot be empty");
    }

    if path.len() > 512 {
        return Err("Path exceeds maximum length of 512 characters");
    }

    if path.contains('\0') {
        return Err("Path must not contain null bytes");
    }

    if path.contains('\\') {
        return Err("Path must not contain backslashes");
    }

    if path.starts_with('/') {
        return Err("Path must not start with '/'");
    }

    if path.ends_with('/') {
        return Err("Path must not end with '/'");
    }

    if contains_path_traversal(path) {
        return Err("Path must not contain '..' traversal");
    }

    for segment in path.split('/') {
        if segment.is_empty() {
            return Err("Path must not contain empty segments");
        }
        if segment.starts_with('.') {
            return Err("Path segments must not start with '.'");
        }
    }

    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return Err("Path contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)");
    }

    Ok(path)
}
