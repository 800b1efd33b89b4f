//! Dashboard read-models
//!
//! Every dashboard is a table of rows tagged with the property they belong
//! to. [`SampleData`] serves fixed in-memory rows; a real read API would
//! implement [`DashboardSource`] instead.

use std::fmt::Debug;

/// The dashboards reachable from the view router, in tab order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
pub enum Tab {
    #[default]
    Profitability,
    Crew,
    Sales,
    Marketing,
    #[strum(to_string = "Quests")]
    QuestManagement,
    #[strum(to_string = "Nodes")]
    NodeManagement,
    #[strum(to_string = "Cities")]
    CityManagement,
    #[strum(to_string = "Events")]
    EventManagement,
    #[strum(to_string = "Captain's Deck")]
    CaptainsDeck,
    #[strum(to_string = "Vibe")]
    VibeCuration,
    Cafe,
    #[strum(to_string = "Tasks")]
    TaskScheduler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub property: &'static str,
    pub cells: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: &'static str,
    pub columns: &'static [&'static str],
    pub rows: &'static [Row],
}

pub trait DashboardSource: Debug + Send + Sync {
    /// Names of every property in the network.
    fn properties(&self) -> &[&'static str];

    fn table(&self, tab: Tab) -> &Table;
}

/// Case-insensitive filter over a table.
///
/// A row survives when it belongs to `property` (or `property` is `None`) and
/// every whitespace-separated term of `query` occurs in its property name or
/// one of its cells.
pub fn filter_rows<'a>(table: &'a Table, property: Option<&str>, query: &str) -> Vec<&'a Row> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    table
        .rows
        .iter()
        .filter(|row| property.is_none_or(|p| row.property.eq_ignore_ascii_case(p)))
        .filter(|row| {
            terms.iter().all(|term| {
                row.property.to_lowercase().contains(term)
                    || row.cells.iter().any(|cell| cell.to_lowercase().contains(term))
            })
        })
        .collect()
}

const HARBOR: &str = "Harbor House";
const CEDAR: &str = "Cedar Loft";
const MARIGOLD: &str = "Marigold Commons";
const NORTHSTAR: &str = "Northstar Hub";

const PROPERTIES: &[&str] = &[HARBOR, CEDAR, MARIGOLD, NORTHSTAR];

const fn row(property: &'static str, cells: &'static [&'static str]) -> Row {
    Row { property, cells }
}

static PROFITABILITY: Table = Table {
    title: "Profitability",
    columns: &["Month", "Revenue", "Costs", "Margin", "Occupancy"],
    rows: &[
        row(HARBOR, &["Aug", "$84,200", "$51,900", "38%", "94%"]),
        row(HARBOR, &["Sep", "$81,650", "$52,300", "36%", "91%"]),
        row(CEDAR, &["Aug", "$46,100", "$33,800", "27%", "88%"]),
        row(CEDAR, &["Sep", "$48,900", "$34,100", "30%", "92%"]),
        row(MARIGOLD, &["Aug", "$62,400", "$47,000", "25%", "79%"]),
        row(MARIGOLD, &["Sep", "$58,300", "$46,200", "21%", "74%"]),
        row(NORTHSTAR, &["Aug", "$103,500", "$70,100", "32%", "97%"]),
        row(NORTHSTAR, &["Sep", "$99,800", "$69,400", "30%", "95%"]),
    ],
};

static CREW: Table = Table {
    title: "Crew",
    columns: &["Name", "Role", "Shift", "Status"],
    rows: &[
        row(HARBOR, &["Asha Menon", "Community Lead", "Morning", "On duty"]),
        row(HARBOR, &["Ravi Kulkarni", "Housekeeping", "Evening", "Off"]),
        row(CEDAR, &["Neha Iyer", "Front Desk", "Morning", "On duty"]),
        row(CEDAR, &["Kabir Shah", "Maintenance", "Night", "On leave"]),
        row(MARIGOLD, &["Priya Das", "Community Lead", "Evening", "On duty"]),
        row(MARIGOLD, &["Arjun Rao", "Chef", "Morning", "On duty"]),
        row(NORTHSTAR, &["Meera Pillai", "Operations", "Morning", "On duty"]),
        row(NORTHSTAR, &["Dev Malhotra", "Security", "Night", "Off"]),
    ],
};

static SALES: Table = Table {
    title: "Sales",
    columns: &["Lead", "Plan", "Stage", "Value"],
    rows: &[
        row(HARBOR, &["Tanvi Joshi", "Monthly Suite", "Site visit", "$1,450"]),
        row(CEDAR, &["Studio Nine", "Team Desk x6", "Proposal", "$3,900"]),
        row(CEDAR, &["Omar Farooq", "Hot Desk", "Won", "$240"]),
        row(MARIGOLD, &["Lena Park", "Quarterly Room", "Negotiation", "$4,200"]),
        row(NORTHSTAR, &["Brightline Labs", "Private Office", "Won", "$7,800"]),
        row(NORTHSTAR, &["Sam Ortiz", "Monthly Suite", "Lost", "$1,450"]),
    ],
};

static MARKETING: Table = Table {
    title: "Marketing Funnel",
    columns: &["Channel", "Visits", "Leads", "Bookings", "Conversion"],
    rows: &[
        row(HARBOR, &["Instagram", "12,400", "310", "42", "13.5%"]),
        row(HARBOR, &["Referral", "1,120", "96", "31", "32.3%"]),
        row(CEDAR, &["Google Ads", "8,760", "205", "19", "9.3%"]),
        row(MARIGOLD, &["Newsletter", "3,300", "88", "12", "13.6%"]),
        row(NORTHSTAR, &["LinkedIn", "5,940", "174", "37", "21.3%"]),
        row(NORTHSTAR, &["Events", "2,050", "143", "40", "28.0%"]),
    ],
};

static QUESTS: Table = Table {
    title: "Quest Economy",
    columns: &["Quest", "Reward", "Completions", "Status"],
    rows: &[
        row(HARBOR, &["Sunrise Yoga Streak", "120 pts", "48", "Active"]),
        row(HARBOR, &["Host a Potluck", "300 pts", "9", "Active"]),
        row(CEDAR, &["Fix-it Friday", "200 pts", "14", "Paused"]),
        row(MARIGOLD, &["Garden Guild", "150 pts", "22", "Active"]),
        row(NORTHSTAR, &["Demo Day Speaker", "500 pts", "6", "Active"]),
        row(NORTHSTAR, &["Mentor Hour", "250 pts", "31", "Ended"]),
    ],
};

static NODES: Table = Table {
    title: "Node Management",
    columns: &["Device", "Kind", "Battery", "Status"],
    rows: &[
        row(HARBOR, &["lock-lobby-01", "Smart lock", "82%", "Online"]),
        row(HARBOR, &["therm-3f", "Thermostat", "n/a", "Online"]),
        row(CEDAR, &["cam-entry", "Camera", "n/a", "Offline"]),
        row(CEDAR, &["lock-roof", "Smart lock", "14%", "Low battery"]),
        row(MARIGOLD, &["leak-kitchen", "Leak sensor", "67%", "Online"]),
        row(NORTHSTAR, &["meter-main", "Power meter", "n/a", "Online"]),
        row(NORTHSTAR, &["lock-suite-4", "Smart lock", "5%", "Low battery"]),
    ],
};

static CITIES: Table = Table {
    title: "City Management",
    columns: &["City", "Beds", "Desks", "Launch"],
    rows: &[
        row(HARBOR, &["Goa", "64", "40", "2021"]),
        row(CEDAR, &["Bengaluru", "38", "120", "2022"]),
        row(MARIGOLD, &["Pune", "52", "30", "2023"]),
        row(NORTHSTAR, &["Mumbai", "110", "210", "2020"]),
    ],
};

static EVENTS: Table = Table {
    title: "Event Management",
    columns: &["Event", "Date", "RSVPs", "Capacity"],
    rows: &[
        row(HARBOR, &["Full Moon Jam", "Oct 17", "58", "60"]),
        row(CEDAR, &["Founder Breakfast", "Oct 21", "24", "30"]),
        row(MARIGOLD, &["Seed Swap", "Oct 19", "17", "40"]),
        row(NORTHSTAR, &["Pitch Night", "Oct 24", "143", "150"]),
        row(NORTHSTAR, &["Design Crit", "Oct 28", "22", "25"]),
    ],
};

static CAPTAINS_DECK: Table = Table {
    title: "Captain's Deck",
    columns: &["Captain", "Residents", "Open Issues", "NPS"],
    rows: &[
        row(HARBOR, &["Asha Menon", "61", "3", "72"]),
        row(CEDAR, &["Neha Iyer", "34", "5", "58"]),
        row(MARIGOLD, &["Priya Das", "41", "1", "81"]),
        row(NORTHSTAR, &["Meera Pillai", "104", "9", "64"]),
    ],
};

static VIBE: Table = Table {
    title: "Vibe Curation",
    columns: &["Space", "Playlist", "Lighting", "Scent"],
    rows: &[
        row(HARBOR, &["Lobby", "Lo-fi Sunrise", "Warm 2700K", "Sea salt"]),
        row(HARBOR, &["Rooftop", "Balearic Sunset", "Amber", "Citrus"]),
        row(CEDAR, &["Focus Room", "Deep Work", "Cool 5000K", "None"]),
        row(MARIGOLD, &["Courtyard", "Acoustic Brunch", "Daylight", "Jasmine"]),
        row(NORTHSTAR, &["Atrium", "City Pulse", "Neutral 4000K", "Cedarwood"]),
    ],
};

static CAFE: Table = Table {
    title: "Cafe",
    columns: &["Item", "Sold Today", "Stock", "Price"],
    rows: &[
        row(HARBOR, &["Cold Brew", "86", "40", "$4.50"]),
        row(HARBOR, &["Avocado Toast", "34", "12", "$7.00"]),
        row(CEDAR, &["Filter Coffee", "120", "200", "$2.00"]),
        row(MARIGOLD, &["Masala Chai", "95", "150", "$2.50"]),
        row(NORTHSTAR, &["Oat Latte", "143", "60", "$5.25"]),
        row(NORTHSTAR, &["Protein Bowl", "51", "8", "$9.75"]),
    ],
};

static TASKS: Table = Table {
    title: "Task Scheduler",
    columns: &["Task", "Assignee", "Due", "Priority"],
    rows: &[
        row(HARBOR, &["Deep clean rooftop", "Ravi Kulkarni", "Oct 16", "High"]),
        row(CEDAR, &["Replace roof lock battery", "Kabir Shah", "Oct 15", "Urgent"]),
        row(CEDAR, &["Restock meeting room", "Neha Iyer", "Oct 18", "Low"]),
        row(MARIGOLD, &["Compost pickup", "Arjun Rao", "Oct 17", "Medium"]),
        row(NORTHSTAR, &["Fire drill", "Meera Pillai", "Oct 22", "High"]),
        row(NORTHSTAR, &["Badge audit", "Dev Malhotra", "Oct 25", "Medium"]),
    ],
};

/// Fixed in-memory rows for every dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl DashboardSource for SampleData {
    fn properties(&self) -> &[&'static str] {
        PROPERTIES
    }

    fn table(&self, tab: Tab) -> &Table {
        match tab {
            Tab::Profitability => &PROFITABILITY,
            Tab::Crew => &CREW,
            Tab::Sales => &SALES,
            Tab::Marketing => &MARKETING,
            Tab::QuestManagement => &QUESTS,
            Tab::NodeManagement => &NODES,
            Tab::CityManagement => &CITIES,
            Tab::EventManagement => &EVENTS,
            Tab::CaptainsDeck => &CAPTAINS_DECK,
            Tab::VibeCuration => &VIBE,
            Tab::Cafe => &CAFE,
            Tab::TaskScheduler => &TASKS,
        }
    }
}
