use serde::{Deserialize, Serialize};
use std::fmt;

/// Calculator categories. Display names double as the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electrical,
    Mechanical,
    Civil,
    #[serde(rename = "General Science")]
    GeneralScience,
    #[serde(rename = "AC Circuits")]
    AcCircuits,
    Electronics,
    #[serde(rename = "Wire & Cable")]
    WireAndCable,
    #[serde(rename = "Power System")]
    PowerSystem,
    Motor,
    #[serde(rename = "Battery & Energy")]
    BatteryAndEnergy,
    #[serde(rename = "Renewable Energy")]
    RenewableEnergy,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Electrical,
        Category::Mechanical,
        Category::Civil,
        Category::GeneralScience,
        Category::AcCircuits,
        Category::Electronics,
        Category::WireAndCable,
        Category::PowerSystem,
        Category::Motor,
        Category::BatteryAndEnergy,
        Category::RenewableEnergy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Electrical => "Electrical",
            Category::Mechanical => "Mechanical",
            Category::Civil => "Civil",
            Category::GeneralScience => "General Science",
            Category::AcCircuits => "AC Circuits",
            Category::Electronics => "Electronics",
            Category::WireAndCable => "Wire & Cable",
            Category::PowerSystem => "Power System",
            Category::Motor => "Motor",
            Category::BatteryAndEnergy => "Battery & Energy",
            Category::RenewableEnergy => "Renewable Energy",
        }
    }

    /// Exact match on the display name.
    pub fn from_name(name: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// URL segment used by `/category/{slug}` pages.
    pub fn slug(&self) -> String {
        crate::seo::category_slug(self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symbolic glyph names understood by the page renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Zap,
    Activity,
    Battery,
    Cable,
    Cpu,
    Gauge,
    Ruler,
    Sun,
    Wind,
    Cog,
    Building,
    Waves,
    Thermometer,
    Timer,
    Calculator,
    Plug,
    Lightbulb,
    Weight,
    Droplet,
    Radio,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Zap => "Zap",
            Icon::Activity => "Activity",
            Icon::Battery => "Battery",
            Icon::Cable => "Cable",
            Icon::Cpu => "Cpu",
            Icon::Gauge => "Gauge",
            Icon::Ruler => "Ruler",
            Icon::Sun => "Sun",
            Icon::Wind => "Wind",
            Icon::Cog => "Cog",
            Icon::Building => "Building",
            Icon::Waves => "Waves",
            Icon::Thermometer => "Thermometer",
            Icon::Timer => "Timer",
            Icon::Calculator => "Calculator",
            Icon::Plug => "Plug",
            Icon::Lightbulb => "Lightbulb",
            Icon::Weight => "Weight",
            Icon::Droplet => "Droplet",
            Icon::Radio => "Radio",
        }
    }
}

/// Static description of one calculator page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub path: String,
    pub icon: Icon,
}

/// Calculators sharing a category, in registry order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub slug: String,
    pub calculators: Vec<&'a CalculatorDescriptor>,
}
