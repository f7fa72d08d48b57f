use shoetracker_core::service::detail::{details_preview, purchase_label, share_text};
use shoetracker_core::{StarFill, TryOn, TryOnDetail, TryOnDraft};

#[test]
fn detail_projection_formats_fields_for_display() {
    let mut draft = TryOnDraft::new("Air Max");
    draft.rating = 7.0;
    draft.purchased = true;
    draft.size = "10".to_string();
    draft.date = 1_741_600_000_000;
    let try_on = TryOn::create(draft).unwrap();

    let detail = TryOnDetail::from(&try_on);

    assert_eq!(detail.id, try_on.id);
    assert_eq!(detail.purchase_label, "PURCHASED");
    assert_eq!(detail.rating, "7.0");
    assert_eq!(
        detail.stars,
        [
            StarFill::Full,
            StarFill::Full,
            StarFill::Full,
            StarFill::Half,
            StarFill::Empty
        ]
    );
    assert_eq!(detail.date, "March 10, 2025");
    assert_eq!(detail.size, "10");
    assert_eq!(detail.width, "—");
    assert_eq!(detail.location, "—");
    assert_eq!(detail.details, "—");
}

#[test]
fn share_text_includes_name_and_rating() {
    let mut draft = TryOnDraft::new("Ultraboost");
    draft.rating = 6.0;
    let try_on = TryOn::create(draft).unwrap();

    assert_eq!(
        share_text(&try_on),
        "Check out this shoe I tried: Ultraboost - Rating: 6.0/10"
    );
}

#[test]
fn purchase_label_distinguishes_try_on_only() {
    assert_eq!(purchase_label(false), "TRY-ON ONLY");
    assert_eq!(purchase_label(true), "PURCHASED");
}

#[test]
fn details_preview_is_none_for_empty_notes() {
    assert_eq!(details_preview(""), None);
}
