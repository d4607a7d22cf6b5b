use eoplot::error::EoplotError;
use eoplot::model::{AxisTag, Coord, CoordList, Metadata};
use ndarray::array;
use std::sync::Arc;

fn coord(name: &str, axis: AxisTag) -> Arc<Coord> {
    Arc::new(Coord::new(
        array![5.0, 4.0].into_dyn(),
        Metadata::new(name, ""),
        axis,
    ))
}

fn dummy_coordinates_list() -> CoordList {
    CoordList::from_coords(vec![coord("testY", AxisTag::Y), coord("testX", AxisTag::X)]).unwrap()
}

#[test]
fn can_create_a_valid_list_of_coordinates() {
    let list = dummy_coordinates_list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].standard_name(), "testY");
    assert_eq!(list[1].standard_name(), "testX");
    assert_eq!(list[0].axis, AxisTag::Y);
    assert_eq!(list[1].axis, AxisTag::X);
}

#[test]
fn can_append_to_list_of_coordinates() {
    let mut list = dummy_coordinates_list();
    list.append(coord("testZ", AxisTag::Z)).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[2].standard_name(), "testZ");
    assert_eq!(list[2].axis, AxisTag::Z);
}

#[test]
fn append_a_duplicate_to_a_list_of_coordinates_fails() {
    let mut list = dummy_coordinates_list();
    let err = list.append(coord("testX", AxisTag::X));
    assert!(matches!(
        err,
        Err(EoplotError::DuplicateCoordinate { name }) if name == "testX"
    ));
    assert_eq!(list.len(), 2);
}

#[test]
fn can_find_a_coord_from_a_list_of_coordinates() {
    let list = dummy_coordinates_list();
    let coord = list.get_coord("testX").unwrap();
    assert_eq!(coord.standard_name(), "testX");
    assert_eq!(coord.axis, AxisTag::X);
}

#[test]
fn missing_coord_lookup_is_an_error() {
    let list = dummy_coordinates_list();
    assert!(matches!(
        list.get_coord("testW"),
        Err(EoplotError::CoordinateNotFound { name }) if name == "testW"
    ));
}

#[test]
fn can_find_many_coords_from_a_list_of_coordinates() {
    let mut list = dummy_coordinates_list();
    list.append(Arc::new(Coord::new(
        array![5.0, 4.0].into_dyn(),
        Metadata::new("height_a", "").with_display_name("testZ"),
        AxisTag::Z,
    )))
    .unwrap();
    list.append(Arc::new(Coord::new(
        array![5.0, 4.0].into_dyn(),
        Metadata::new("height_b", "").with_display_name("testZ"),
        AxisTag::Unlabeled,
    )))
    .unwrap();
    assert_eq!(list.len(), 4);

    let coords = list.get_coords("testZ");
    assert_eq!(coords.len(), 2);
    assert_eq!(coords[0].name(), "testZ");
    assert_eq!(coords[0].axis, AxisTag::Z);
    assert_eq!(coords[1].axis, AxisTag::Unlabeled);
}
