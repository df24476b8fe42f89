use circledet::{Accumulator, CircleDetError, ImagePyramid, ImageView, OwnedImage};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        CircleDetError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        CircleDetError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        CircleDetError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, CircleDetError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_strided_rows_skip_padding() {
    let data: Vec<u8> = (0u8..12).collect();
    let view = ImageView::new(&data, 3, 2, 6).unwrap();
    assert_eq!(view.row(0).unwrap(), &[0u8, 1, 2]);
    assert_eq!(view.row(1).unwrap(), &[6u8, 7, 8]);
    assert_eq!(view.get(2, 1).copied(), Some(8u8));
    assert!(view.get(3, 0).is_none());
    assert!(view.row(2).is_none());
}

#[test]
fn owned_image_requires_exact_buffer_length() {
    let err = OwnedImage::new(vec![0u8; 3], 2, 2).err().unwrap();
    assert_eq!(err, CircleDetError::BufferTooSmall { needed: 4, got: 3 });

    let err = OwnedImage::new(vec![0u8; 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        CircleDetError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );

    let img = OwnedImage::new(vec![7u8; 4], 2, 2).unwrap();
    assert_eq!(img.view().get(1, 1).copied(), Some(7u8));
}

#[test]
fn image_pyramid_downsamples_by_two() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let pyramid = ImagePyramid::build_u8(view, 10).unwrap();
    assert_eq!(pyramid.levels().len(), 3);

    let level1 = pyramid.level(1).unwrap();
    assert_eq!(level1.width(), 2);
    assert_eq!(level1.height(), 2);
    assert_eq!(level1.row(0).unwrap(), &[3u8, 5u8]);
    assert_eq!(level1.row(1).unwrap(), &[11u8, 13u8]);

    let level2 = pyramid.level(2).unwrap();
    assert_eq!(level2.width(), 1);
    assert_eq!(level2.height(), 1);
    assert!(pyramid.level(3).is_none());
}

#[test]
fn accumulator_rejects_inverted_radius_band() {
    let err = Accumulator::new(8, 8, 5, 4).err().unwrap();
    assert_eq!(
        err,
        CircleDetError::InvalidRadiusRange {
            radius_min: 5,
            radius_max: 4,
        }
    );
}

#[test]
fn accumulator_sums_are_order_independent() {
    let mut forward = Accumulator::new(6, 9, 2, 7).unwrap();
    let mut backward = Accumulator::new(6, 9, 2, 7).unwrap();
    let votes = [0.5f32, 1.25, 2.0, 0.125, 3.5];

    for &v in votes.iter() {
        forward.add(4, 7, 5, v);
    }
    for &v in votes.iter().rev() {
        backward.add(4, 7, 5, v);
    }

    let expected: f32 = votes.iter().sum();
    assert!((forward.at(4, 7, 5) - expected).abs() < 1e-5);
    assert!((backward.at(4, 7, 5) - expected).abs() < 1e-5);
}
