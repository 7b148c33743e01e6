use std::io::BufRead;

use bevy::math::Vec3;
use ply_rs::{
    parser::Parser,
    ply::{
        Property,
        PropertyAccess,
    },
};

use crate::{
    cloud::PointCloud,
    io::PlyCloudError,
};


#[derive(Clone, Copy, Debug, Default)]
pub struct PlyPoint {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PropertyAccess for PlyPoint {
    fn new() -> Self {
        PlyPoint::default()
    }

    fn set_property(&mut self, key: String, property: Property) {
        match (key.as_ref(), property) {
            ("x", Property::Float(v)) => self.position[0] = v,
            ("y", Property::Float(v)) => self.position[1] = v,
            ("z", Property::Float(v)) => self.position[2] = v,
            ("x", Property::Double(v)) => self.position[0] = v as f32,
            ("y", Property::Double(v)) => self.position[1] = v as f32,
            ("z", Property::Double(v)) => self.position[2] = v as f32,
            ("red", Property::UChar(v)) => self.color[0] = v as f32 / 255.0,
            ("green", Property::UChar(v)) => self.color[1] = v as f32 / 255.0,
            ("blue", Property::UChar(v)) => self.color[2] = v as f32 / 255.0,
            ("red", Property::Float(v)) => self.color[0] = v,
            ("green", Property::Float(v)) => self.color[1] = v,
            ("blue", Property::Float(v)) => self.color[2] = v,
            (_, _) => {}
        }
    }
}

/// Parses a binary or ascii PLY vertex cloud. Positions are required; colors
/// are attached when the vertex element declares them.
pub fn parse_ply(mut reader: &mut dyn BufRead) -> Result<PointCloud, PlyCloudError> {
    let point_parser = Parser::<PlyPoint>::new();
    let header = point_parser.read_header(&mut reader)?;

    let mut points = Vec::new();
    let mut with_color = false;

    let required_properties = ["x", "y", "z"];
    let color_properties = ["red", "green", "blue"];

    for (_key, element) in &header.elements {
        if element.name == "vertex" {
            let mut required_property_count = required_properties.len();
            let mut color_property_count = color_properties.len();

            for (key, _prop) in &element.properties {
                required_property_count -=
                    required_properties.contains(&key.as_str()) as usize;
                color_property_count -= color_properties.contains(&key.as_str()) as usize;
            }

            if required_property_count > 0 {
                return Err(PlyCloudError::MissingProperties);
            }
            with_color = color_property_count == 0;

            points = point_parser.read_payload_for_element(&mut reader, element, &header)?;
        }
    }

    let positions = points.iter().map(|point| Vec3::from(point.position)).collect();
    let colors = with_color.then(|| points.iter().map(|point| point.color).collect());

    Ok(PointCloud { positions, colors })
}
