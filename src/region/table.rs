//! Static region tables.
//!
//! `REGION_CODES` is the bulk mapping as whitespace-separated code lists;
//! `AGGREGATE_OVERRIDES` are single-code entries applied afterwards.

use crate::models::Region;

/// Bulk code lists per region
pub const REGION_CODES: &[(Region, &str)] = &[
    (Region::NorthAmerica, "CAN USA GRL BMU"),
    (
        Region::LatinAmericaCaribbean,
        "ABW AIA ATG ARG BHS BRB BLZ BOL BRA CHL COL CRI CUB CUW CYM
         DMA DOM ECU GLP GRD GTM GUF GUY HND HTI JAM KNA LCA MEX MSR MTQ
         NIC PAN PER PRI PRY SUR TTO URY VEN VCT VGB SLV",
    ),
    (
        Region::EuropeCentralAsia,
        "ALA ALB AND ARM AUT AZE BEL BGR BIH BLR CHE CYP CZE DEU DNK ESP EST
         FIN FRA GBR GEO GRC HRV HUN IRL ISL ITA KAZ KGZ LTU LUX LVA MDA MKD
         MLT MNE NLD NOR POL PRT ROU RUS SMR SRB SVK SVN SWE TUR UKR UZB TJK",
    ),
    (
        Region::MiddleEastNorthAfrica,
        "ARE BHR DZA EGY IRN IRQ ISR JOR KWT LBN LBY MAR MRT OMN PSE QAT
         SAU SDN SYR TUN YEM",
    ),
    (
        Region::SubSaharanAfrica,
        "AGO BDI BEN BFA BWA CIV CMR COD COG COM CPV DJI ETH GAB GHA GIN
         GMB GNB GNQ KEN LBR LSO MDG MLI MOZ MUS MWI NAM NER NGA RWA SEN
         SLE SOM SSD STP SWZ TCD TGO TZA UGA ZAF ZMB ZWE REU SYC",
    ),
    (Region::SouthAsia, "AFG BGD BTN IND LKA MDV NPL PAK"),
    (
        Region::EastAsiaPacific,
        "AUS BRN CHN COK FJI FSM GUM HKG IDN JPN KHM KIR KOR LAO MAC MMR
         MNG MYS NCL NZL PHL PNG PLW SGP SLB THA TLS TON VNM VUT WSM PYF",
    ),
];

/// Aggregate codes, taking precedence over the bulk lists
pub const AGGREGATE_OVERRIDES: &[(&str, Region)] = &[
    ("NAC", Region::NorthAmerica),
    ("SAS", Region::SouthAsia),
    ("WLD", Region::Global),
];
