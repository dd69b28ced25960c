use super::*;
use crate::net::types::DeviceImage;
use crate::state::gallery::ImageCategory;

#[test]
fn missing_device_is_not_found_not_failure() {
    let missing = Err(ApiError::Status { status: 404, detail: Some("Not found.".to_owned()) });
    assert_eq!(DeviceLoad::from_result(&missing), DeviceLoad::NotFound);

    let broken = Err(ApiError::Network("offline".to_owned()));
    assert_eq!(DeviceLoad::from_result(&broken), DeviceLoad::Failed);
}

#[test]
fn intake_and_untagged_images_open_in_their_own_groups() {
    let detail = DeviceDetail {
        serial_number: "SN-1".to_owned(),
        images: vec![
            DeviceImage { url: "/a.jpg".to_owned(), category: Some("Приемка".to_owned()), comment: None },
            DeviceImage { url: "/b.jpg".to_owned(), category: None, comment: None },
        ],
        ..DeviceDetail::default()
    };
    let DeviceLoad::Ready(loaded) = DeviceLoad::from_result(&Ok(detail)) else {
        panic!("expected ready");
    };
    let groups = group_images(&loaded.images, &loaded.comments);
    let visible = groups.iter().filter(|g| g.is_visible()).collect::<Vec<_>>();
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].category, ImageCategory::Intake);
    assert_eq!(visible[1].category, ImageCategory::Work);

    let mut lightbox = Lightbox::default();
    lightbox.open(visible[1], 0);
    assert_eq!(lightbox.category(), Some(ImageCategory::Work));
    lightbox.next();
    assert_eq!(lightbox.current().map(|i| i.url.as_str()), Some("/b.jpg"));
}

#[test]
fn answer_for_a_serial_no_longer_shown_is_dropped() {
    let found = Ok(DeviceDetail { serial_number: "SN-1".to_owned(), ..DeviceDetail::default() });
    assert_eq!(DeviceLoad::answer_for("SN-1", "SN-2", &found), None);
    assert!(matches!(DeviceLoad::answer_for("SN-1", "SN-1", &found), Some(DeviceLoad::Ready(_))));

    let missing = Err(ApiError::Status { status: 404, detail: None });
    assert_eq!(DeviceLoad::answer_for("SN-1", "SN-1", &missing), Some(DeviceLoad::NotFound));
}
