use crate::{CatalogError, CatalogSource, id_or_raw_input};
use domain::{CatalogEntry, CategoryMap};

/// (title, source, watch URL)
type BuiltinVideo = (&'static str, &'static str, &'static str);

const LOTTERY: &[BuiltinVideo] = &[
    ("Powerball 12-16-24", "WITN-TV", "https://www.youtube.com/watch?v=duAeRtYeC0E"),
    ("Powerball: December 16, 2024", "News 19 WLTX", "https://www.youtube.com/watch?v=pZfZRybbCTA"),
    ("Powerball 12-14-24", "WITN-TV", "https://www.youtube.com/watch?v=Dvx_L3_2Bkc"),
    (
        "No big winner: Mega Millions jackpot grows to $825 million",
        "KTSM 9 NEWS",
        "https://www.youtube.com/watch?v=SUUaR2cpAOI",
    ),
    (
        "Mega Million Jackpot climbs to $825 million",
        "PAHomepage.com",
        "https://www.youtube.com/watch?v=zlmdubztPLU",
    ),
    ("Mega Millions reaches $825 million", "KCENNews", "https://www.youtube.com/watch?v=S8DQTx1bRzs"),
    (
        "Mega Millions Jackpot jumps to $825 million",
        "WUSA9",
        "https://www.youtube.com/watch?v=t9qGo-6I-SA",
    ),
    (
        "Mega Millions jackpot grows to $825M",
        "Atlanta News First",
        "https://www.youtube.com/watch?v=D2Y8EfwXyho",
    ),
    ("Mega Millions jackpot rises to $825M", "WCNC", "https://www.youtube.com/watch?v=DunhkRLJl0w"),
    (
        "Mega Millions draws rare consecutive numbers but no winner",
        "TODAY",
        "https://www.youtube.com/watch?v=u3JXD2fE3Is",
    ),
    (
        "Numbers drawn in Tuesday's Mega Millions jackpot",
        "Eyewitness News ABC7NY",
        "https://www.youtube.com/watch?v=cu9xSZ5PAe0",
    ),
    ("Mega Millions 12-17-24", "WITN-TV", "https://www.youtube.com/watch?v=MlTKxrYu2EQ"),
    (
        "Lottery fever grows at the jackpot increases",
        "WFAA",
        "https://www.youtube.com/watch?v=LNpjln4H0Ok",
    ),
    (
        "Mega Millions jackpot swells to $825M",
        "NBC10 Philadelphia",
        "https://www.youtube.com/watch?v=FV7oPEAskVo",
    ),
    ("MegaMillions: December 17, 2024", "News 19 WLTX", "https://www.youtube.com/watch?v=oKgV2FQxBps"),
];

const CATEGORIES: &[(&str, &[BuiltinVideo])] = &[("Lottery", LOTTERY)];

/// The category map compiled into the binary. Edit `CATEGORIES` to change
/// what a plain run fetches.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<CategoryMap, CatalogError> {
        let mut map = CategoryMap::new();
        for (category, videos) in CATEGORIES {
            let mut entries = Vec::with_capacity(videos.len());
            for (title, source, url) in *videos {
                entries.push(
                    CatalogEntry::new(id_or_raw_input(category, url))
                        .with_label(*title)
                        .with_source(*source)
                        .with_url(*url),
                );
            }
            map.insert(category.to_string(), entries);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_resolves_every_url() {
        let map = BuiltinCatalog.load().unwrap();
        assert_eq!(map.len(), 1);

        let lottery = &map["Lottery"];
        assert_eq!(lottery.len(), 15);
        assert_eq!(lottery[0].video_id, "duAeRtYeC0E");
        assert_eq!(lottery[0].source.as_deref(), Some("WITN-TV"));
        assert_eq!(lottery[14].video_id, "oKgV2FQxBps");
        assert!(lottery.iter().all(|entry| entry.video_id.len() == 11));
    }
}
