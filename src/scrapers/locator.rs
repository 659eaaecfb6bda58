use crate::scrapers::types::{AdContainer, ContainerContent, DetailAnchor};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Thumbnail image names carry a numeric id; classes on the page are not stable.
static THUMBNAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"thumb_\d+").unwrap());
static DETAIL_LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/annonce/").unwrap());

const CONTAINER_TAGS: [&str; 3] = ["div", "article", "section"];

/// Find every ad on a listing page, in document order.
///
/// One `AdContainer` per thumbnail; repeated thumbnails are not deduplicated.
pub fn locate_ads(document: &Html) -> Vec<AdContainer> {
    let img_selector = Selector::parse("img[src]").unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();

    document
        .select(&img_selector)
        .filter(|img| {
            img.value()
                .attr("src")
                .is_some_and(|src| THUMBNAIL_RE.is_match(src))
        })
        .map(|img| AdContainer {
            image_src: img.value().attr("src").unwrap_or_default().to_string(),
            image_alt: img.value().attr("alt").unwrap_or_default().to_string(),
            container: nearest_container(img).map(|c| read_container(c, &link_selector)),
        })
        .collect()
}

/// Closest ancestor that is one of the structural container tags
fn nearest_container(img: ElementRef<'_>) -> Option<ElementRef<'_>> {
    img.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| CONTAINER_TAGS.contains(&el.value().name()))
}

fn read_container(container: ElementRef<'_>, link_selector: &Selector) -> ContainerContent {
    let anchor = container
        .select(link_selector)
        .find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| DETAIL_LINK_RE.is_match(href))
        })
        .map(|a| DetailAnchor {
            href: a.value().attr("href").unwrap_or_default().to_string(),
            title: a.value().attr("title").map(str::to_string),
            text: a.text().collect(),
        });

    ContainerContent {
        text: container.text().collect(),
        anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_PAGE: &str = r#"
<html><body>
<main>
  <div class="col s6 m4 l3">
    <div class="card ad__card">
      <a class="card-image ad__card-image" href="/annonce/villas/villa-4-pieces-dakar-4512345" title="Villa 4 pièces à louer">
        <img class="ad__card-img" src="https://images.coinafrique.com/thumb_4512345.jpg" alt="Villa 4 pièces 200 m² à louer">
      </a>
      <p class="ad__card-price">2 500 000 CFA</p>
      <p class="ad__card-location"><span class="material-icons">location_on</span>Dakar, Sénégal</p>
    </div>
  </div>
  <img src="https://images.coinafrique.com/logo.png" alt="logo">
  <article>
    <img src="https://images.coinafrique.com/thumb_99.jpg" alt="Terrain 300 m2">
    <a href="/profil/vendeur">vendeur</a>
  </article>
  <img src="https://images.coinafrique.com/thumb_7.jpg" alt="Appartement 3P">
</main>
</body></html>
"#;

    #[test]
    fn one_container_per_thumbnail_in_source_order() {
        let doc = Html::parse_document(LISTING_PAGE);
        let ads = locate_ads(&doc);

        let srcs: Vec<_> = ads.iter().map(|a| a.image_src.as_str()).collect();
        assert_eq!(
            srcs,
            vec![
                "https://images.coinafrique.com/thumb_4512345.jpg",
                "https://images.coinafrique.com/thumb_99.jpg",
                "https://images.coinafrique.com/thumb_7.jpg",
            ]
        );
    }

    #[test]
    fn container_carries_text_and_detail_anchor() {
        let doc = Html::parse_document(LISTING_PAGE);
        let ads = locate_ads(&doc);
        let first = &ads[0];

        assert_eq!(first.image_alt, "Villa 4 pièces 200 m² à louer");
        let container = first.container.as_ref().expect("container");
        assert!(container.text.contains("location_onDakar, Sénégal"));
        assert!(container.text.contains("2 500 000 CFA"));

        let anchor = container.anchor.as_ref().expect("anchor");
        assert_eq!(anchor.href, "/annonce/villas/villa-4-pieces-dakar-4512345");
        assert_eq!(anchor.title.as_deref(), Some("Villa 4 pièces à louer"));
    }

    #[test]
    fn non_detail_links_are_ignored() {
        let doc = Html::parse_document(LISTING_PAGE);
        let ads = locate_ads(&doc);
        let container = ads[1].container.as_ref().expect("article container");
        assert!(container.anchor.is_none());
    }

    #[test]
    fn body_level_thumbnail_is_containerless() {
        let doc = Html::parse_document(
            r#"<html><body><img src="/img/thumb_1.jpg" alt="Villa"></body></html>"#,
        );
        let ads = locate_ads(&doc);
        assert_eq!(ads.len(), 1);
        assert!(ads[0].container.is_none());
        assert_eq!(ads[0].image_alt, "Villa");
    }

    #[test]
    fn repeated_thumbnails_are_kept() {
        let doc = Html::parse_document(
            r#"<div><img src="thumb_5.jpg"></div><div><img src="thumb_5.jpg"></div>"#,
        );
        assert_eq!(locate_ads(&doc).len(), 2);
    }

    #[test]
    fn page_without_thumbnails_yields_nothing() {
        let doc = Html::parse_document("<html><body><p>Aucune annonce</p></body></html>");
        assert!(locate_ads(&doc).is_empty());
    }
}
