//! Built-in Klang Valley network.
//!
//! Used when no network definition file is configured. Covers the
//! Kelana Jaya and Kajang lines with their two interchanges. No fares
//! are built in.

use super::source::{LineDef, NetworkDefinition, StationDef};

const KAJANG_LINE: &[&str] = &[
    "Kajang",
    "Stadium Kajang",
    "Sungai Jernih",
    "Bukit Dukung",
    "Batu 11 Cheras",
    "Bandar Tun Hussein Onn",
    "Sri Raya",
    "Taman Suntex",
    "Taman Connaught",
    "Taman Mutiara",
    "Taman Midah",
    "Taman Pertama",
    "Maluri (SBK)",
    "Cochrane",
    "Tun Razak Exchange (TRX)",
    "Bukit Bintang",
    "Merdeka",
    "Pasar Seni (SBK)",
    "Muzium Negara",
    "Semantan",
    "Pusat Bandar Damansara",
    "Phileo Damansara",
    "TTDI",
    "Bandar Utama",
    "Mutiara Damansara",
    "Surian",
    "Kota Damansara",
    "Kwasa Sentral",
    "Kwasa Damansara",
];

const KELANA_JAYA_LINE: &[&str] = &[
    "Gombak",
    "Taman Melati",
    "Wangsa Maju",
    "Sri Rampai",
    "Setiawangsa",
    "Jelatek",
    "Dato' Keramat",
    "Damai",
    "Ampang Park",
    "KLCC",
    "Kampung Baru",
    "Dang Wangi",
    "Masjid Jamek (KJL)",
    "Pasar Seni (KJL)",
    "KL Sentral (KJL)",
    "Bangsar",
    "Abdullah Hukum",
    "Kerinchi",
    "Universiti",
    "Taman Jaya",
    "Asia Jaya",
    "Taman Paramount",
    "Taman Bahagia",
    "Kelana Jaya",
    "Lembah Subang",
    "Ara Damansara",
    "Glenmarie",
    "Subang Jaya",
    "SS 15",
    "SS 18",
    "USJ 7 (KJL)",
    "Taipan",
    "Wawasan",
    "USJ 21",
    "Alam Megah",
    "Subang Alam",
    "Putra Heights (KJL)",
];

const INTERCHANGES: &[(&str, &str)] = &[
    ("Pasar Seni (KJL)", "Pasar Seni (SBK)"),
    ("Muzium Negara", "KL Sentral (KJL)"),
];

const EXCLUDED: &[&str] = &["Sungai Buloh", "Kampung Selamat"];

/// Verified station coordinates (latitude, longitude).
const COORDINATES: &[(&str, f64, f64)] = &[
    ("Abdullah Hukum", 3.1188319, 101.6732377),
    ("Alam Megah", 3.0231025098204394, 101.57211549888724),
    ("Ampang Park", 3.160062, 101.7190053),
    ("Ara Damansara", 3.108771553447338, 101.5864149115486),
    ("Asia Jaya", 3.104441327047661, 101.63770721799644),
    ("Bandar Tun Hussein Onn", 3.0483702717217134, 101.77512808852975),
    ("Bandar Utama", 3.1468634, 101.6186865),
    ("Bangsar", 3.1275597, 101.6790602),
    ("Batu 11 Cheras", 3.0415490607439075, 101.7733156711643),
    ("Bukit Bintang", 3.1460953, 101.7114762),
    ("Bukit Dukung", 3.026512260525024, 101.771092267453),
    ("Cochrane", 3.1324723, 101.7230543),
    ("Damai", 3.1644733, 101.7244083),
    ("Dang Wangi", 3.1568579, 101.7019848),
    ("Dato' Keramat", 3.1650189, 101.731853),
    ("Glenmarie", 3.096073268173765, 101.59025995211034),
    ("Gombak", 3.2312176, 101.7244253),
    ("Jelatek", 3.1673333, 101.7353159),
    ("KL Sentral (KJL)", 3.1343094015014534, 101.68609334693598),
    ("KLCC", 3.1592469, 101.7133662),
    ("Kajang", 2.983291228870008, 101.79053187175903),
    ("Kampung Baru", 3.1613264, 101.7065974),
    ("Kelana Jaya", 3.1126776830519387, 101.6044900809461),
    ("Kerinchi", 3.1154917, 101.6684949),
    ("Kota Damansara", 3.1505241189110476, 101.57864315506677),
    ("Kwasa Damansara", 3.1767415079468546, 101.57236334656068),
    ("Kwasa Sentral", 3.17017353275566, 101.56483436930343),
    ("Lembah Subang", 3.1122616050632335, 101.59122896745326),
    ("Maluri (SBK)", 3.1247549674463815, 101.72727635211051),
    ("Masjid Jamek (KJL)", 3.1494620854175155, 101.69642181864305),
    ("Merdeka", 3.1429735, 101.7021849),
    ("Mutiara Damansara", 3.1553010001163844, 101.60871960112053),
    ("Muzium Negara", 3.1371006, 101.6873833),
    ("Pasar Seni (KJL)", 3.1427085851764684, 101.695410170714),
    ("Pasar Seni (SBK)", 3.142481415420169, 101.69531614794404),
    ("Phileo Damansara", 3.1291991, 101.6429822),
    ("Pusat Bandar Damansara", 3.1432978, 101.6624268),
    ("Putra Heights (KJL)", 2.9960778476011956, 101.57551791822944),
    ("SS 15", 3.076219, 101.58811),
    ("SS 18", 3.06915, 101.5852),
    ("Semantan", 3.1509652, 101.6653573),
    ("Setiawangsa", 3.175800522606992, 101.73589617084988),
    ("Sri Rampai", 3.1992489, 101.7372696),
    ("Sri Raya", 3.0622258470111072, 101.77286110369512),
    ("Stadium Kajang", 2.994544316111254, 101.7863435958347),
    ("Subang Alam", 3.0094572000250905, 101.5722796108533),
    ("Subang Jaya", 3.0845797544535625, 101.5873752659475),
    ("Sungai Jernih", 3.0007633321499747, 101.78396771663952),
    ("Surian", 3.1497108546873873, 101.59367164252724),
    ("TTDI", 3.1361413, 101.6307373),
    ("Taipan", 3.0481687210747563, 101.59023720769395),
    ("Taman Bahagia", 3.1107266099634368, 101.61269758648046),
    ("Taman Connaught", 3.0791818, 101.7451427),
    ("Taman Jaya", 3.1075, 101.646),
    ("Taman Melati", 3.2195172, 101.721876),
    ("Taman Midah", 3.104286, 101.7323396),
    ("Taman Mutiara", 3.0912676, 101.7403423),
    ("Taman Paramount", 3.1047123428799814, 101.62315876050071),
    ("Taman Pertama", 3.1127246, 101.7292803),
    ("Taman Suntex", 3.0715969903540437, 101.76358207087557),
    ("Tun Razak Exchange (TRX)", 3.1427699, 101.7200049),
    ("USJ 21", 3.029892040067465, 101.58171229295425),
    ("USJ 7 (KJL)", 3.0553321159333717, 101.59190822389331),
    ("Universiti", 3.1145395, 101.6617007),
    ("Wangsa Maju", 3.2057781, 101.7318615),
    ("Wawasan", 3.03507492592289, 101.58834495372092),
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The default Klang Valley network definition.
pub fn klang_valley() -> NetworkDefinition {
    NetworkDefinition {
        stations: COORDINATES
            .iter()
            .map(|&(name, latitude, longitude)| StationDef {
                name: name.to_string(),
                latitude: Some(latitude),
                longitude: Some(longitude),
            })
            .collect(),
        lines: vec![
            LineDef {
                name: "Kelana Jaya".to_string(),
                stations: owned(KELANA_JAYA_LINE),
            },
            LineDef {
                name: "Kajang".to_string(),
                stations: owned(KAJANG_LINE),
            },
        ],
        interchanges: INTERCHANGES
            .iter()
            .map(|&(a, b)| (a.to_string(), b.to_string()))
            .collect(),
        connections: Vec::new(),
        excluded: owned(EXCLUDED),
    }
}
