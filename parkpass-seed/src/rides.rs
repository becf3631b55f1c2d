use parkpass_core::NewRide;

pub struct SeedRide {
    pub name: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub min_height: Option<f64>,
    pub queue_time: i32,
    pub park_area: &'static str,
}

impl SeedRide {
    pub fn to_new_ride(&self) -> NewRide {
        NewRide {
            name: self.name.to_string(),
            location: self.location.to_string(),
            description: Some(self.description.to_string()),
            min_height: self.min_height,
            queue_time: self.queue_time,
            park_area: Some(self.park_area.to_string()),
        }
    }
}

/// Walt Disney World attractions across the four parks.
pub const RIDES: &[SeedRide] = &[
    SeedRide {
        name: "Jungle Cruise",
        location: "Adventureland",
        description: "Embark on a guided tour through exotic jungle settings",
        min_height: None,
        queue_time: 45,
        park_area: "Magic Kingdom - Adventureland",
    },
    SeedRide {
        name: "Pirates of the Caribbean",
        location: "Adventureland",
        description: "Experience the life and exploits of pirate crews throughout the ages",
        min_height: None,
        queue_time: 55,
        park_area: "Magic Kingdom - Adventureland",
    },
    SeedRide {
        name: "Big Thunder Mountain Railroad",
        location: "Frontierland",
        description: "A thrilling runaway mine train roller coaster",
        min_height: Some(3.8),
        queue_time: 60,
        park_area: "Magic Kingdom - Frontierland",
    },
    SeedRide {
        name: "Splash Mountain",
        location: "Frontierland",
        description: "Splash down a thrilling five-story drop",
        min_height: Some(3.6),
        queue_time: 50,
        park_area: "Magic Kingdom - Frontierland",
    },
    SeedRide {
        name: "Space Mountain",
        location: "Tomorrowland",
        description: "Blast off on an outer space adventure",
        min_height: Some(3.6),
        queue_time: 65,
        park_area: "Magic Kingdom - Tomorrowland",
    },
    SeedRide {
        name: "Buzz Lightyear of Star Command Astro Blasters",
        location: "Tomorrowland",
        description: "Battle the Evil Emperor Zurg with interactive laser cannons",
        min_height: None,
        queue_time: 35,
        park_area: "Magic Kingdom - Tomorrowland",
    },
    SeedRide {
        name: "Cinderella's Royal Table",
        location: "Fantasyland",
        description: "Dine in Cinderella's Castle and meet Disney Princesses",
        min_height: None,
        queue_time: 120,
        park_area: "Magic Kingdom - Fantasyland",
    },
    SeedRide {
        name: "It's a Small World",
        location: "Fantasyland",
        description: "Journey around the world celebrating world cultures",
        min_height: None,
        queue_time: 25,
        park_area: "Magic Kingdom - Fantasyland",
    },
    SeedRide {
        name: "Haunted Mansion",
        location: "Liberty Square",
        description: "Tour a spooky mansion filled with 999 happy haunts",
        min_height: None,
        queue_time: 40,
        park_area: "Magic Kingdom - Liberty Square",
    },
    SeedRide {
        name: "Test Track",
        location: "EPCOT - Future World",
        description: "Test innovative vehicles in a thrilling high-speed drive",
        min_height: Some(3.8),
        queue_time: 50,
        park_area: "EPCOT",
    },
    SeedRide {
        name: "Soarin' Around the World",
        location: "EPCOT - The Land",
        description: "Glide over the world's most beautiful landmarks",
        min_height: None,
        queue_time: 45,
        park_area: "EPCOT",
    },
    SeedRide {
        name: "The Seas with Nemo & Friends",
        location: "EPCOT - Future World",
        description: "Explore the ocean with Nemo and friends",
        min_height: None,
        queue_time: 30,
        park_area: "EPCOT",
    },
    SeedRide {
        name: "Frozen Ever After",
        location: "EPCOT - Norway",
        description: "Join Anna and Elsa in a winter-themed musical journey",
        min_height: None,
        queue_time: 55,
        park_area: "EPCOT",
    },
    SeedRide {
        name: "Star Wars: Galaxy's Edge - Millennium Falcon Smugglers Run",
        location: "Star Wars: Galaxy's Edge",
        description: "Pilot the legendary Millennium Falcon on a cargo mission",
        min_height: None,
        queue_time: 90,
        park_area: "Hollywood Studios",
    },
    SeedRide {
        name: "Tower of Terror",
        location: "Twilight Zone Tower of Terror",
        description: "Face the unknown in a haunted hotel tower",
        min_height: Some(4.0),
        queue_time: 65,
        park_area: "Hollywood Studios",
    },
    SeedRide {
        name: "Rock 'n' Roller Coaster Starring Aerosmith",
        location: "Hollywood Studios - Sunset Boulevard",
        description: "Launch into a high-speed rock and roll adventure",
        min_height: Some(3.8),
        queue_time: 50,
        park_area: "Hollywood Studios",
    },
    SeedRide {
        name: "Toy Story Land - Slinky Dog Dash",
        location: "Toy Story Land",
        description: "Ride along Slinky Dog's track in Andy's backyard",
        min_height: Some(3.5),
        queue_time: 75,
        park_area: "Hollywood Studios",
    },
    SeedRide {
        name: "Expedition Everest",
        location: "Asia",
        description: "Encounter the legendary Yeti on this thrilling coaster",
        min_height: Some(3.6),
        queue_time: 60,
        park_area: "Animal Kingdom",
    },
    SeedRide {
        name: "Kilimanjaro Safaris",
        location: "Africa",
        description: "See real animals on an African safari adventure",
        min_height: None,
        queue_time: 40,
        park_area: "Animal Kingdom",
    },
    SeedRide {
        name: "Avatar Flight of Passage",
        location: "Pandora - The World of Avatar",
        description: "Soar through the mystical world of Pandora on a banshee",
        min_height: Some(3.6),
        queue_time: 100,
        park_area: "Animal Kingdom",
    },
    SeedRide {
        name: "Kali River Rapids",
        location: "Asia",
        description: "Navigate through a white-water river adventure",
        min_height: Some(3.3),
        queue_time: 45,
        park_area: "Animal Kingdom",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_passes_ride_validation() {
        assert_eq!(RIDES.len(), 21);
        for ride in RIDES {
            let new_ride = ride.to_new_ride();
            assert!(parkpass_core::validate(&new_ride).is_ok(), "{} is invalid", ride.name);
        }
    }
}
