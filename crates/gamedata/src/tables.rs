//! The raw tables. Names and hashes are as the game ships them.

use crate::RegularTrack;

const fn track(
    name: &'static str,
    alias: &'static str,
    slot: &'static str,
    sha1: &'static str,
) -> RegularTrack {
    RegularTrack {
        name,
        alias,
        slot,
        sha1,
    }
}

/// The 32 tracks shipped with the game, in cup order.
pub const REGULAR_TRACKS: [RegularTrack; 32] = [
    track("Luigi Circuit", "LC", "08", "1AE1A7D894960B38E09E7494373378D87305A163"),
    track("Moo Moo Meadows", "MMM", "01", "90720A7D57A7C76E2347782F6BDE5D22342FB7DD"),
    track("Mushroom Gorge", "MG", "02", "0E380357AFFCFD8722329994885699D9927F8276"),
    track("Toad's Factory", "TF", "04", "1896AEA49617A571C66FF778D8F2ABBE9E5D7479"),
    track("Mario Circuit", "MC", "00", "7752BB51EDBC4A95377C0A05B0E0DA1503786625"),
    track("Coconut Mall", "CM", "05", "E4BF364CB0C5899907585D731621CA930A4EF85C"),
    track("DK Summit", "DKSC", "06", "B02ED72E00B400647BDA6845BE387C47D251F9D1"),
    track("Wario's Gold Mine", "WGM", "07", "D1A453B43D6920A78565E65A4597E353B177ABD0"),
    track("Daisy Circuit", "DC", "09", "72D0241C75BE4A5EBD242B9D8D89B1D6FD56BE8F"),
    track("Koopa Cape", "KC", "0F", "52F01AE3AED1E0FA4C7459A648494863E83A548C"),
    track("Maple Treeway", "MT", "0B", "48EBD9D64413C2B98D2B92E5EFC9B15ECD76FEE6"),
    track("Grumble Volcano", "GV", "03", "ACC0883AE0CE7879C6EFBA20CFE5B5909BF7841B"),
    track("Dry Dry Ruins", "DDR", "0E", "38486C4F706395772BD988C1AC5FA30D27CAE098"),
    track("Moonview Highway", "MH", "0A", "B13C515475D7DA207DFD5BADD886986147B906FF"),
    track("Bowser's Castle", "BC", "0C", "B9821B14A89381F9C015669353CB24D7DB1BB25D"),
    track("Rainbow Road", "RR", "0D", "FFE518915E5FAAA889057C8A3D3E439868574508"),
    track("GCN Peach Beach", "rPB", "10", "8014488A60F4428EEF52D01F8C5861CA9565E1CA"),
    track("DS Yoshi Falls", "rYF", "14", "8C854B087417A92425110CC71E23C944D6997806"),
    track("SNES Ghost Valley 2", "rGV2", "19", "071D697C4DDB66D3B210F36C7BF878502E79845B"),
    track("N64 Mario Raceway", "rMR", "1A", "49514E8F74FEA50E77273C0297086D67E58123E8"),
    track("N64 Sherbet Land", "rSL", "1B", "BA9BCFB3731A6CB17DBA219A8D37EA4D52332256"),
    track("GBA Shy Guy Beach", "rSGB", "1F", "E8ED31605CC7D6660691998F024EED6BA8B4A33F"),
    track("DS Delfino Square", "rDS", "17", "BC038E163D21D9A1181B60CF90B4D03EFAD9E0C5"),
    track("GCN Waluigi Stadium", "rWS", "12", "418099824AF6BF1CD7F8BB44F61E3A9CC3007DAE"),
    track("DS Desert Hills", "rDH", "15", "4EC538065FDC8ACF49674300CBDEC5B80CC05A0D"),
    track("GBA Bowser Castle 3", "rBC3", "1E", "A4BEA41BE83D816F793F3FAD97D268F71AD99BF9"),
    track("N64 DK's Jungle Parkway", "rDKJP", "1D", "692D566B05434D8C66A55BDFF486698E0FC96095"),
    track("GCN Mario Circuit", "rMC", "11", "1941A29AD2E7B7BBA8A29E6440C95EF5CF76B01D"),
    track("SNES Mario Circuit 3", "rMC3", "18", "077111B996E5C4F47D20EC29C2938504B53A8E76"),
    track("DS Peach Gardens", "rPG", "16", "F9A62BEF04CC8F499633E4023ACC7675A92771F0"),
    track("GCN DK Mountain", "rDKM", "13", "B036864CF0016BE0581449EF29FB52B2E58D78A4"),
    track("N64 Bowser's Castle", "rBC", "1C", "15B303B288F4707E5D0AF28367C8CE51CDEAB490"),
];

/// Vehicle display names, indexed by in-game vehicle id.
pub const VEHICLES: [&str; 36] = [
    "Standard Kart S",
    "Standard Kart M",
    "Standard Kart L",
    "Booster Seat",
    "Classic Dragster",
    "Offroader",
    "Mini Beast",
    "Wild Wing",
    "Flame Flyer",
    "Cheep Charger",
    "Super Blooper",
    "Piranha Prowler",
    "Tiny Titan",
    "Daytripper",
    "Jetsetter",
    "Blue Falcon",
    "Sprinter",
    "Honeycoupe",
    "Standard Bike S",
    "Standard Bike M",
    "Standard Bike L",
    "Bullet Bike",
    "Mach Bike",
    "Flame Runner",
    "Bit Bike",
    "Sugarscoot",
    "Wario Bike",
    "Quacker",
    "Zip Zip",
    "Shooting Star",
    "Magikruiser",
    "Sneakster",
    "Spear",
    "Jet Bubble",
    "Dolphin Dasher",
    "Phantom",
];

/// Driver display names, indexed by in-game driver id.
pub const DRIVERS: [&str; 48] = [
    "Mario",
    "Baby Peach",
    "Waluigi",
    "Bowser",
    "Baby Daisy",
    "Dry Bones",
    "Baby Mario",
    "Luigi",
    "Toad",
    "Donkey Kong",
    "Yoshi",
    "Wario",
    "Baby Luigi",
    "Toadette",
    "Koopa Troopa",
    "Daisy",
    "Peach",
    "Birdo",
    "Diddy Kong",
    "King Boo",
    "Bowser Jr.",
    "Dry Bowser",
    "Funky Kong",
    "Rosalina",
    "Small Mii Outfit A (Male)",
    "Small Mii Outfit A (Female)",
    "Small Mii Outfit B (Male)",
    "Small Mii Outfit B (Female)",
    "Small Mii Outfit C (Male)",
    "Small Mii Outfit C (Female)",
    "Medium Mii Outfit A (Male)",
    "Medium Mii Outfit A (Female)",
    "Medium Mii Outfit B (Male)",
    "Medium Mii Outfit B (Female)",
    "Medium Mii Outfit C (Male)",
    "Medium Mii Outfit C (Female)",
    "Large Mii Outfit A (Male)",
    "Large Mii Outfit A (Female)",
    "Large Mii Outfit B (Male)",
    "Large Mii Outfit B (Female)",
    "Large Mii Outfit C (Male)",
    "Large Mii Outfit C (Female)",
    "Medium Mii",
    "Small Mii",
    "Large Mii",
    "Peach",
    "Daisy",
    "Rosalina",
];

/// Controller display names, indexed by in-game controller id.
pub const CONTROLLERS: [&str; 4] = ["Wii Wheel", "Wiimote & Nunchuk", "Classic", "Gamecube"];

/// Console prefixes used by custom-track naming.
pub const PREFIXES: [&str; 9] = [
    "SNES", "GBA", "N64", "GCN", "DS", "CTR", "DKR", "GP", "SADX",
];
