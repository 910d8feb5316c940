use std::error;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Coordinate, ExampleData};

/// A named, geo-located tour station with descriptive metadata and an
/// opaque image asset handle.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<String>,
}

impl PointOfInterest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl ExampleData for PointOfInterest {
    fn example_data() -> Self {
        Self {
            id: 2,
            name: "Memorial do ET".to_owned(),
            description: "R. Maria Paiva Pinto, 105 - Vila Paiva".to_owned(),
            latitude: -21.53944157296884,
            longitude: -45.43689312383651,
            image: Some("memorial.png".to_owned()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CatalogError {
    Empty,
    Parse(Arc<serde_json::Error>),
}

impl error::Error for CatalogError {}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "a catalog must contain at least one point of interest"),
            CatalogError::Parse(why) => write!(f, "catalog JSON parse error: {}", why),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(why: serde_json::Error) -> Self {
        CatalogError::Parse(Arc::new(why))
    }
}

/// Immutable, non-empty catalog of points of interest. Pure configuration
/// data, loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    points: Vec<PointOfInterest>,
}

impl Catalog {
    pub fn new(points: Vec<PointOfInterest>) -> Result<Self, CatalogError> {
        if points.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { points })
    }

    /// Loads a catalog from a JSON array of points of interest.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let points: Vec<PointOfInterest> = serde_json::from_str(json)?;
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        // non-empty by construction
        false
    }

    pub fn get(&self, index: usize) -> Option<&PointOfInterest> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.points.iter()
    }

    /// Length of the full tour in kilometers as the crow flies, including
    /// the closing leg back to the first station.
    pub fn total_length_km(&self) -> f64 {
        self.points
            .iter()
            .chain(self.points.first())
            .tuple_windows()
            .map(|(a, b)| a.coordinate().distance_km(&b.coordinate()))
            .sum()
    }

    /// The builtin tour: the eight stations of the "Rota do ET" in
    /// Varginha, MG.
    pub fn et_tour() -> Self {
        let points = vec![
            PointOfInterest {
                id: 1,
                name: "Terreno em que ET teria sido visto por meninas"
                    .to_owned(),
                description: "Rua Dr. Benevenuto Braz Viêira, 21 - Vila Andere"
                    .to_owned(),
                latitude: -21.568298300296714,
                longitude: -45.43423220696292,
                image: Some("terreno.webp".to_owned()),
            },
            PointOfInterest {
                id: 2,
                name: "Memorial do ET".to_owned(),
                description: "R. Maria Paiva Pinto, 105 - Vila Paiva"
                    .to_owned(),
                latitude: -21.53944157296884,
                longitude: -45.43689312383651,
                image: Some("memorial.png".to_owned()),
            },
            PointOfInterest {
                id: 3,
                name: "Nave Espacial e Estátua do ET".to_owned(),
                description: "Praça Getúlio Vargas, 193 - Centro".to_owned(),
                latitude: -21.55930627625668,
                longitude: -45.43999730338807,
                image: Some("nave.png".to_owned()),
            },
            PointOfInterest {
                id: 4,
                name: "Estátuas com formato do ‘verdadeiro’ ET".to_owned(),
                description: "Praça José R. Paiva - Centro".to_owned(),
                latitude: -21.55720673416103,
                longitude: -45.43842937385777,
                image: Some("estatuaet2.png".to_owned()),
            },
            PointOfInterest {
                id: 5,
                name: "Ponto de ônibus temático".to_owned(),
                description: "Av. Francisco Navarra, 425".to_owned(),
                latitude: -21.566611540623995,
                longitude: -45.43696405587806,
                image: Some("pontodeonibus.png".to_owned()),
            },
            PointOfInterest {
                id: 6,
                name: "Zoológico de Varginha".to_owned(),
                description: "R. Petrópolis - Jardim Petropolis".to_owned(),
                latitude: -21.56777478239457,
                longitude: -45.44578910437535,
                image: Some("zoovarginha.png".to_owned()),
            },
            PointOfInterest {
                id: 7,
                name: "Prefeitura Municipal".to_owned(),
                description: "R. Júlio Paulo Marcelini, 50".to_owned(),
                latitude: -21.544688046723167,
                longitude: -45.44453380612826,
                image: Some("prefeituraelevador.png".to_owned()),
            },
            PointOfInterest {
                id: 8,
                name: "Aeroporto de Varginha".to_owned(),
                description: "Aeroporto, Varginha - MG".to_owned(),
                latitude: -21.588588533252317,
                longitude: -45.47640492882973,
                image: Some("aeroporto.png".to_owned()),
            },
        ];
        Self { points }
    }
}
