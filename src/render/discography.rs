use std::path::{Path, PathBuf};

use crate::{
    store::CatalogStore,
    types::{Album, Track},
    utils,
};

const CSS: &str = "
.discography {
    border-collapse: collapse;
    width: 100%;
    max-width: 1200px;
    margin: 20px auto;
}
.discography th, .discography td {
    padding: 10px;
    text-align: left;
    border-bottom: 1px solid #ddd;
}
.discography a {
    color: #000;
    text-decoration: none;
}
.discography a:hover {
    text-decoration: underline;
}
.image-links a {
    color: #666;
    font-size: 0.9em;
    margin: 0 5px;
}
.track-row {
    background-color: #f9f9f9;
}
.track-row td {
    padding-left: 30px;
}
.duration {
    color: #666;
    font-size: 0.9em;
}
.code-link {
    color: #666;
    font-size: 0.9em;
    margin-left: 10px;
}
.empty-message {
    text-align: center;
    padding: 40px;
    color: #666;
    font-size: 1.2em;
}
";

/// Renders the whole persisted catalog as one standalone HTML document.
///
/// Albums come out in store order (newest first) with their tracks nested
/// underneath in track-number order. An empty store still produces a valid
/// document containing a single empty-state row. Pure function of store
/// contents; the only side effect is the file write.
pub async fn render(store: &CatalogStore, output_path: &Path) -> crate::Res<PathBuf> {
    let artists = store.list_artists()?;
    let albums = store.list_albums(None)?;

    let page_title = match artists.first() {
        Some(artist) => format!("{name} Discography", name = artist.name),
        None => "Discography".to_string(),
    };

    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>{css}</style>\n\
         </head>\n\
         <body>\n\
         <table class=\"discography\">\n\
         <thead>\n\
         <tr><th></th><th>Type</th><th>Title</th><th>Release Date</th><th>Duration</th><th>Links</th></tr>\n\
         </thead>\n\
         <tbody>\n",
        title = utils::escape_html(&page_title),
        css = CSS
    );

    if albums.is_empty() {
        html.push_str(
            "<tr><td colspan=\"6\" class=\"empty-message\">No releases in catalog</td></tr>\n",
        );
    } else {
        for album in &albums {
            html.push_str(&album_row(album));
            for track in store.list_tracks_for_album(&album.id)? {
                html.push_str(&track_row(&track));
            }
        }
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    async_fs::write(output_path, html).await?;
    Ok(output_path.to_path_buf())
}

fn album_row(album: &Album) -> String {
    let name = utils::escape_html(&album.name);
    format!(
        "<tr class=\"main-row\">\n\
         <td><a href=\"{large}\" target=\"_blank\" class=\"thumbnail\">\
         <img src=\"{thumb}\" width=\"64\" height=\"64\" alt=\"{name}\"></a></td>\n\
         <td>{kind}</td>\n\
         <td><a href=\"{url}\" target=\"_blank\">{name}</a></td>\n\
         <td>{date}</td>\n\
         <td></td>\n\
         <td class=\"image-links\">\
         <a href=\"{large}\" target=\"_blank\">640x640</a> |\
         <a href=\"{medium}\" target=\"_blank\">300x300</a> |\
         <a href=\"{thumb}\" target=\"_blank\">64x64</a>\
         <a href=\"{code}\" target=\"_blank\" class=\"code-link\">Scan Code</a></td>\n\
         </tr>\n",
        large = album.image_large_uri,
        medium = album.image_medium_uri,
        thumb = album.image_thumb_uri,
        name = name,
        kind = capitalize(&album.album_type),
        url = album.spotify_url,
        date = utils::format_release_date(&album.release_date),
        code = album.qr_code_url
    )
}

fn track_row(track: &Track) -> String {
    format!(
        "<tr class=\"track-row\">\n\
         <td></td>\n\
         <td></td>\n\
         <td><a href=\"{url}\" target=\"_blank\">{name}</a></td>\n\
         <td></td>\n\
         <td class=\"duration\">{duration}</td>\n\
         <td><a href=\"{code}\" target=\"_blank\" class=\"code-link\">Scan Code</a></td>\n\
         </tr>\n",
        url = track.spotify_url,
        name = utils::escape_html(&track.name),
        duration = track.duration,
        code = track.qr_code_url
    )
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
