//! Static team-to-community link tables.
//!
//! Keys are the provider's team identifier rendered as a string; the `0`
//! entry is the whole-league fallback. Read-only for the process
//! lifetime, consumed only as template input.

use std::collections::HashMap;

use super::Sport;

const MLB: &[(&str, &str)] = &[
    ("142", "/c/minnesotatwins@fanaticus.social"),
    ("145", "/c/whitesox@fanaticus.social"),
    ("116", "/c/motorcitykitties@fanaticus.social"),
    ("118", "/c/kcroyals@fanaticus.social"),
    ("114", "/c/clevelandguardians@fanaticus.social"),
    ("140", "/c/texasrangers@fanaticus.social"),
    ("117", "/c/astros@fanaticus.social"),
    ("133", "/c/oaklandathletics@fanaticus.social"),
    ("108", "/c/angelsbaseball@fanaticus.social"),
    ("136", "/c/mariners@fanaticus.social"),
    ("111", "/c/redsox@fanaticus.social"),
    ("147", "/c/nyyankees@fanaticus.social"),
    ("141", "/c/torontobluejays@fanaticus.social"),
    ("139", "/c/tampabayrays@fanaticus.social"),
    ("110", "/c/orioles@fanaticus.social"),
    ("138", "/c/cardinals@fanaticus.social"),
    ("113", "/c/reds@fanaticus.social"),
    ("134", "/c/buccos@fanaticus.social"),
    ("112", "/c/chicubs@fanaticus.social"),
    ("158", "/c/brewers@fanaticus.social"),
    ("137", "/c/sfgiants@fanaticus.social"),
    ("109", "/c/azdiamondbacks@fanaticus.social"),
    ("115", "/c/coloradorockies@fanaticus.social"),
    ("119", "/c/dodgers@fanaticus.social"),
    ("135", "/c/padres@fanaticus.social"),
    ("143", "/c/phillies@fanaticus.social"),
    ("121", "/c/newyorkmets@fanaticus.social"),
    ("146", "/c/miamimarlins@fanaticus.social"),
    ("120", "/c/nationals@fanaticus.social"),
    ("144", "/c/braves@fanaticus.social"),
    ("0", "/c/baseball@fanaticus.social"),
];

const NBA: &[(&str, &str)] = &[
    ("1610612737", "/r/atlantahawks"),
    ("1610612751", "/r/gonets"),
    ("1610612738", "/r/bostonceltics"),
    ("1610612766", "/r/charlottehornets"),
    ("1610612741", "/r/chicagobulls"),
    ("1610612739", "/r/clevelandcavs"),
    ("1610612742", "/r/mavericks"),
    ("1610612743", "/r/denvernuggets"),
    ("1610612765", "/r/detroitpistons"),
    ("1610612744", "/r/warriors"),
    ("1610612745", "/r/rockets"),
    ("1610612754", "/r/pacers"),
    ("1610612746", "/r/laclippers"),
    ("1610612747", "/r/lakers"),
    ("1610612763", "/r/memphisgrizzlies"),
    ("1610612748", "/r/heat"),
    ("1610612749", "/r/mkebucks"),
    ("1610612750", "/r/timberwolves"),
    ("1610612740", "/r/nolapelicans"),
    ("1610612752", "/r/nyknicks"),
    ("1610612760", "/r/thunder"),
    ("1610612753", "/r/orlandomagic"),
    ("1610612755", "/r/sixers"),
    ("1610612756", "/r/suns"),
    ("1610612757", "/r/ripcity"),
    ("1610612758", "/r/kings"),
    ("1610612759", "/r/nbaspurs"),
    ("1610612761", "/r/torontoraptors"),
    ("1610612762", "/r/utahjazz"),
    ("1610612764", "/r/washingtonwizards"),
    ("0", "/r/nba"),
];

const NFL: &[(&str, &str)] = &[
    ("ARI", "/r/AZCardinals"),
    ("ATL", "/r/falcons"),
    ("BAL", "/r/ravens"),
    ("BUF", "/r/buffalobills"),
    ("CAR", "/r/panthers"),
    ("CHI", "/r/CHIBears"),
    ("CIN", "/r/bengals"),
    ("CLE", "/r/Browns"),
    ("DAL", "/r/cowboys"),
    ("DEN", "/r/DenverBroncos"),
    ("DET", "/r/detroitlions"),
    ("GB", "/r/GreenBayPackers"),
    ("HOU", "/r/Texans"),
    ("IND", "/r/Colts"),
    ("JAX", "/r/Jaguars"),
    ("KC", "/r/KansasCityChiefs"),
    ("LA", "/r/LosAngelesRams"),
    ("LAC", "/r/Chargers"),
    ("LV", "/r/raiders"),
    ("MIA", "/r/miamidolphins"),
    ("MIN", "/r/minnesotavikings"),
    ("NE", "/r/Patriots"),
    ("NO", "/r/Saints"),
    ("NYG", "/r/NYGiants"),
    ("NYJ", "/r/nyjets"),
    ("PHI", "/r/eagles"),
    ("PIT", "/r/steelers"),
    ("SEA", "/r/Seahawks"),
    ("SF", "/r/49ers"),
    ("TB", "/r/buccaneers"),
    ("TEN", "/r/Tennesseetitans"),
    ("WAS", "/r/Commanders"),
    ("0", "/r/NFL"),
    ("nfl", "/r/NFL"),
    ("NFL", "/r/NFL"),
];

const NHL: &[(&str, &str)] = &[
    ("1", "/r/devils"),
    ("2", "/r/newyorkislanders"),
    ("3", "/r/rangers"),
    ("4", "/r/flyers"),
    ("5", "/r/penguins"),
    ("6", "/r/bostonbruins"),
    ("7", "/r/sabres"),
    ("8", "/r/habs"),
    ("9", "/r/ottawasenators"),
    ("10", "/r/leafs"),
    ("12", "/r/canes"),
    ("13", "/r/floridapanthers"),
    ("14", "/r/tampabaylightning"),
    ("15", "/r/caps"),
    ("16", "/r/hawks"),
    ("17", "/r/detroitredwings"),
    ("18", "/r/predators"),
    ("19", "/r/stlouisblues"),
    ("20", "/r/calgaryflames"),
    ("21", "/r/coloradoavalanche"),
    ("22", "/r/edmontonoilers"),
    ("23", "/r/canucks"),
    ("24", "/r/anaheimducks"),
    ("25", "/r/dallasstars"),
    ("26", "/r/losangeleskings"),
    ("28", "/r/sanjosesharks"),
    ("29", "/r/bluejackets"),
    ("30", "/r/wildhockey"),
    ("52", "/r/winnipegjets"),
    ("53", "/r/coyotes"),
    ("54", "/r/goldenknights"),
    ("55", "/r/seattlekraken"),
    ("0", "/r/hockey"),
];

pub fn for_sport(sport: Sport) -> HashMap<String, String> {
    let table = match sport {
        Sport::Mlb => MLB,
        Sport::Nba => NBA,
        Sport::Nfl => NFL,
        Sport::Nhl => NHL,
    };
    table
        .iter()
        .map(|(id, sub)| (id.to_string(), sub.to_string()))
        .collect()
}
