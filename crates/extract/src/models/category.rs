use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind};

/// The three kinds of map a database disk carries.
///
/// Declaration order is discovery order: reports always list vector maps
/// first, then raster, then terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Vector,
    Raster,
    Terrain,
}
impl Category {
    /// Every category, in discovery order.
    pub const ALL: [Category; 3] = [Category::Vector, Category::Raster, Category::Terrain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vector => "vector",
            Category::Raster => "raster",
            Category::Terrain => "terrain",
        }
    }

    /// Name of the folder (below the data root) holding maps of this category.
    pub fn folder_name(&self) -> &'static str {
        self.as_str()
    }
}
impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "vector" => Self::Vector,
            "raster" => Self::Raster,
            "terrain" => Self::Terrain,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "category",
                value: s.to_string()
            }),
        })
    }
}
impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_order() {
        let mut shuffled = vec![Category::Terrain, Category::Vector, Category::Raster];
        shuffled.sort();
        assert_eq!(shuffled, Category::ALL.to_vec());
    }

    #[test]
    fn parses_folder_names() {
        for category in Category::ALL {
            assert_eq!(category.folder_name().parse::<Category>().unwrap(), category);
        }
        assert_eq!(" Raster ".parse::<Category>().unwrap(), Category::Raster);
        assert!("sql".parse::<Category>().is_err());
    }
}
