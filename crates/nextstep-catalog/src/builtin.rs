//! The catalog shipped with the NextStep site

use crate::badge::{Badge, BadgeCategory};
use crate::catalog::Catalog;
use crate::event::{Event, EventCategory, EventInfo};
use crate::schema::{Contribution, ProgressKey};
use once_cell::sync::Lazy;

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::new(badges(), events()));

impl Catalog {
    /// Shipped NextStep catalog: 20 badges, 7 events
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }
}

const ICON_BASE: &str = "https://cdn-icons-png.flaticon.com/128";

fn badge(
    id: u32,
    name: &str,
    description: &str,
    icon: &str,
    category: BadgeCategory,
    key: ProgressKey,
    required: u32,
) -> Badge {
    Badge::new(id, name, description, category, key, required)
        .with_icon(format!("{ICON_BASE}/{icon}"))
}

fn badges() -> Vec<Badge> {
    use BadgeCategory::{Impact, Leadership, Milestone, Participation};
    use ProgressKey::*;

    vec![
        badge(
            1,
            "First Step",
            "Attended your first civic event",
            "599/599224.png",
            Milestone,
            EventsAttended,
            1,
        ),
        badge(
            2,
            "Active Citizen",
            "Attended 5 civic events",
            "956/956100.png",
            Participation,
            EventsAttended,
            5,
        ),
        badge(
            3,
            "Community Champion",
            "Attended 10 civic events",
            "2827/2827957.png",
            Participation,
            EventsAttended,
            10,
        ),
        badge(
            4,
            "Civic Hero",
            "Attended 25 civic events",
            "4766/4766834.png",
            Participation,
            EventsAttended,
            25,
        ),
        badge(
            5,
            "Volunteer",
            "Volunteered at your first event",
            "10729/10729191.png",
            Participation,
            VolunteeredHours,
            1,
        ),
        badge(
            6,
            "Helping Hand",
            "Volunteered 10 hours",
            "10845/10845170.png",
            Impact,
            VolunteeredHours,
            10,
        ),
        badge(
            7,
            "Time Champion",
            "Volunteered 50 hours",
            "14118/14118953.png",
            Impact,
            VolunteeredHours,
            50,
        ),
        badge(
            8,
            "Voice of Change",
            "Spoke at a town hall meeting",
            "2168/2168463.png",
            Leadership,
            TownHallSpeeches,
            1,
        ),
        badge(
            9,
            "Earth Guardian",
            "Participated in 3 environmental events",
            "8635/8635653.png",
            Impact,
            EnvironmentalEvents,
            3,
        ),
        badge(
            10,
            "Youth Leader",
            "Attended 5 youth-focused events",
            "1344/1344761.png",
            Leadership,
            YouthEvents,
            5,
        ),
        badge(
            11,
            "Tech Innovator",
            "Attended 3 innovation summits",
            "11995/11995575.png",
            Participation,
            InnovationSummits,
            3,
        ),
        badge(
            12,
            "Early Bird",
            "Registered for an event 1 month in advance",
            "1230/1230870.png",
            Milestone,
            EarlyRegistrations,
            1,
        ),
        badge(
            13,
            "Streak Master",
            "Attended events for 3 consecutive months",
            "14261/14261136.png",
            Milestone,
            ConsecutiveMonths,
            3,
        ),
        badge(
            14,
            "Social Butterfly",
            "Invited 5 friends to events",
            "338/338337.png",
            Leadership,
            FriendsInvited,
            5,
        ),
        badge(
            15,
            "Founding Member",
            "One of the first 100 users",
            "616/616490.png",
            Milestone,
            IsFoundingMember,
            1,
        ),
        badge(
            16,
            "Community Builder",
            "Created or organized a local event",
            "3079/3079652.png",
            Leadership,
            EventsCreated,
            1,
        ),
        badge(
            17,
            "Democracy Champion",
            "Voted in 3 local elections",
            "3553/3553691.png",
            Participation,
            ElectionsVoted,
            3,
        ),
        badge(
            18,
            "Neighborhood Hero",
            "Completed 5 community service projects",
            "2917/2917995.png",
            Impact,
            ServiceProjects,
            5,
        ),
        badge(
            19,
            "Super Connector",
            "Networked with 25 community members",
            "681/681494.png",
            Leadership,
            NetworkConnections,
            25,
        ),
        badge(
            20,
            "Sustainability Star",
            "Participated in 10 environmental initiatives",
            "2990/2990970.png",
            Impact,
            SustainabilityInitiatives,
            10,
        ),
    ]
}

struct Listing<'a> {
    title: &'a str,
    date: &'a str,
    time: &'a str,
    location: &'a str,
    address: &'a str,
    lat: f64,
    lng: f64,
    description: &'a str,
    full_description: &'a str,
    organizer: &'a str,
    contact: &'a str,
    phone: &'a str,
    capacity: u32,
    registered: u32,
    tags: &'a [&'a str],
    requirements: &'a str,
    accessibility: &'a str,
    parking: &'a str,
}

impl Listing<'_> {
    fn into_info(self) -> EventInfo {
        EventInfo {
            title: self.title.to_string(),
            date: self.date.to_string(),
            time: self.time.to_string(),
            location: self.location.to_string(),
            address: self.address.to_string(),
            lat: self.lat,
            lng: self.lng,
            description: self.description.to_string(),
            full_description: self.full_description.to_string(),
            organizer: self.organizer.to_string(),
            contact: self.contact.to_string(),
            phone: self.phone.to_string(),
            capacity: self.capacity,
            registered: self.registered,
            tags: self.tags.iter().map(|t| (*t).to_string()).collect(),
            requirements: self.requirements.to_string(),
            accessibility: self.accessibility.to_string(),
            parking: self.parking.to_string(),
        }
    }
}

fn event(
    id: &str,
    category: EventCategory,
    listing: Listing<'_>,
    progress: &[(ProgressKey, u32)],
) -> Event {
    let title = listing.title;
    progress.iter().fold(
        Event::new(id, category, title).with_info(listing.into_info()),
        |event, &(key, amount)| event.contributes(key, Contribution::Count(amount)),
    )
}

#[allow(clippy::too_many_lines)]
fn events() -> Vec<Event> {
    use ProgressKey::*;

    vec![
        event(
            "event-1",
            EventCategory::Political,
            Listing {
                title: "Town Hall Meeting",
                date: "March 2, 2026",
                time: "7:00 PM",
                location: "Mizner Park Amphitheater",
                address: "590 Plaza Real, Boca Raton, FL 33432",
                lat: 26.354,
                lng: -80.084,
                description: "Join us for a community discussion on local governance and make your voice heard.",
                full_description: "Join us for an important community discussion on local governance. This town hall meeting provides an opportunity for residents to voice their concerns, ask questions, and engage directly with city officials. Topics include upcoming city initiatives, budget planning, and community development projects.",
                organizer: "Boca Raton City Council",
                contact: "cityhall@myboca.us",
                phone: "(561) 393-7700",
                capacity: 200,
                registered: 87,
                tags: &["Government", "Community", "Public Forum"],
                requirements: "Open to all residents, no registration required",
                accessibility: "Wheelchair accessible, ASL interpretation available upon request",
                parking: "Free parking available in Mizner Park garages",
            },
            &[(EventsAttended, 1), (TownHallSpeeches, 0)],
        ),
        event(
            "event-2",
            EventCategory::Youth,
            Listing {
                title: "Youth Leadership Workshop",
                date: "March 6, 2026",
                time: "3:00 PM",
                location: "Boca Raton Community Center",
                address: "150 Crawford Blvd, Boca Raton, FL 33432",
                lat: 26.3682,
                lng: -80.1036,
                description: "Empowering the next generation of civic leaders through interactive workshops.",
                full_description: "This interactive workshop is designed to empower young leaders aged 14-18 with essential civic engagement skills. Participants will learn about community organizing, public speaking, local government processes, and how to turn ideas into action.",
                organizer: "NextStep Youth Initiative",
                contact: "youth@nextstep.org",
                phone: "(561) 555-0123",
                capacity: 50,
                registered: 32,
                tags: &["Youth", "Leadership", "Education", "Skills Development"],
                requirements: "Ages 14-18, registration required",
                accessibility: "Fully accessible facility, refreshments provided",
                parking: "Free parking in community center lot",
            },
            &[(EventsAttended, 1), (YouthEvents, 1)],
        ),
        event(
            "event-3",
            EventCategory::Innovation,
            Listing {
                title: "Tech Innovation Summit",
                date: "March 11, 2026",
                time: "9:00 AM",
                location: "FAU Tech Runway",
                address: "901 NW 35th St, Boca Raton, FL 33431",
                lat: 26.3748,
                lng: -80.1027,
                description: "Discover cutting-edge technology solutions for civic challenges and community development.",
                full_description: "Join us for a full-day summit exploring how technology can address civic challenges. This event brings together tech entrepreneurs, city officials, and community leaders to discuss smart city initiatives, digital civic engagement platforms, and innovative solutions for local problems.",
                organizer: "FAU Tech Runway & NextStep",
                contact: "innovation@nextstep.org",
                phone: "(561) 297-3880",
                capacity: 150,
                registered: 98,
                tags: &["Technology", "Innovation", "Smart City", "Networking"],
                requirements: "Registration required, professional attire suggested",
                accessibility: "ADA compliant facility, dietary restrictions accommodated",
                parking: "Visitor parking available, $5 daily rate",
            },
            &[(EventsAttended, 1), (InnovationSummits, 1)],
        ),
        event(
            "event-4",
            EventCategory::Environmental,
            Listing {
                title: "Beach Clean-Up Day",
                date: "March 14, 2026",
                time: "8:00 AM",
                location: "South Beach Park",
                address: "400 N State Road A1A, Boca Raton, FL 33432",
                lat: 26.3421,
                lng: -80.0758,
                description: "Help keep our beaches clean and beautiful. Supplies provided, just bring your enthusiasm!",
                full_description: "Make a tangible difference in our community by joining our monthly beach cleanup! We'll provide all supplies including gloves, bags, and grabbers. This family-friendly event welcomes volunteers of all ages.",
                organizer: "Boca Environmental Alliance",
                contact: "cleanbeach@bocaenv.org",
                phone: "(561) 555-0145",
                capacity: 100,
                registered: 67,
                tags: &["Environment", "Beach", "Volunteer", "Family-Friendly"],
                requirements: "All ages welcome, no experience needed",
                accessibility: "Beach access mats available, please notify organizer for assistance",
                parking: "Limited free parking, arrive early or carpool",
            },
            &[(EventsAttended, 1), (EnvironmentalEvents, 1), (VolunteeredHours, 2)],
        ),
        event(
            "event-5",
            EventCategory::Education,
            Listing {
                title: "Education Forum",
                date: "March 21, 2026",
                time: "6:30 PM",
                location: "Boca Raton Library",
                address: "400 NW 2nd Ave, Boca Raton, FL 33432",
                lat: 26.3587,
                lng: -80.0831,
                description: "Discuss the future of education in our community with school board members and educators.",
                full_description: "Join school board members, teachers, parents, and students for an important conversation about the future of education in Boca Raton. Topics include curriculum development, technology in classrooms, mental health resources, and preparing students for future careers.",
                organizer: "Boca Raton School Board",
                contact: "board@bocaschools.com",
                phone: "(561) 434-8000",
                capacity: 120,
                registered: 45,
                tags: &["Education", "Schools", "Policy", "Community Input"],
                requirements: "Open to all, students encouraged to attend",
                accessibility: "Fully accessible, childcare available with advance notice",
                parking: "Free parking in library lot",
            },
            &[(EventsAttended, 1)],
        ),
        event(
            "event-6",
            EventCategory::Political,
            Listing {
                title: "City Council Meeting",
                date: "March 25, 2026",
                time: "7:00 PM",
                location: "City Hall",
                address: "201 W Palmetto Park Rd, Boca Raton, FL 33432",
                lat: 26.3586,
                lng: -80.0831,
                description: "Monthly city council meeting open to the public. Voice your concerns and stay informed.",
                full_description: "Regular monthly meeting of the Boca Raton City Council. The meeting is open to the public and includes time for citizen comments on agenda items as well as general public input. Citizens wishing to speak must sign up at the beginning of the meeting.",
                organizer: "City of Boca Raton",
                contact: "cityclerk@myboca.us",
                phone: "(561) 393-7740",
                capacity: 150,
                registered: 23,
                tags: &["Government", "City Council", "Public Meeting", "Democracy"],
                requirements: "Open to all residents, sign up required to speak",
                accessibility: "Fully accessible, live captioning available",
                parking: "Free parking in city hall garage",
            },
            &[(EventsAttended, 1), (ElectionsVoted, 0)],
        ),
        event(
            "event-7",
            EventCategory::Environmental,
            Listing {
                title: "Community Garden Project",
                date: "March 29, 2026",
                time: "9:00 AM",
                location: "Spanish River Park",
                address: "3001 NW 51st St, Boca Raton, FL 33431",
                lat: 26.3778,
                lng: -80.1234,
                description: "Help build our community garden and learn sustainable farming practices.",
                full_description: "Join us for a hands-on community garden building day! We'll be constructing raised beds, installing irrigation, and planting our first crops. Master gardeners will be on hand to teach sustainable farming techniques, composting, and organic pest control.",
                organizer: "Green Boca Initiative",
                contact: "grow@greenboca.org",
                phone: "(561) 555-0178",
                capacity: 40,
                registered: 31,
                tags: &["Environment", "Gardening", "Sustainability", "Hands-On"],
                requirements: "Wear closed-toe shoes and clothes that can get dirty",
                accessibility: "Raised beds designed for wheelchair access",
                parking: "Free parking in park lot",
            },
            &[
                (EventsAttended, 1),
                (EnvironmentalEvents, 1),
                (VolunteeredHours, 3),
                (ServiceProjects, 1),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::BadgeId;
    use std::collections::HashSet;

    #[test]
    fn builtin_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.badges().len(), 20);
        assert_eq!(catalog.events().len(), 7);
    }

    #[test]
    fn builtin_badge_ids_are_unique_and_ascending() {
        let ids: Vec<_> = Catalog::builtin().badges().iter().map(|b| b.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        assert_eq!(ids.first(), Some(&BadgeId(1)));
    }

    #[test]
    fn every_builtin_threshold_is_positive() {
        assert!(Catalog::builtin().badges().iter().all(|b| b.required > 0));
    }

    #[test]
    fn beach_cleanup_contributions() {
        let event = Catalog::builtin().event("event-4").unwrap();
        let progress: Vec<_> = event
            .badge_progress
            .iter()
            .map(|(k, c)| (*k, c.amount()))
            .collect();
        assert_eq!(
            progress,
            vec![
                (ProgressKey::EventsAttended, 1),
                (ProgressKey::EnvironmentalEvents, 1),
                (ProgressKey::VolunteeredHours, 2),
            ]
        );
    }

    #[test]
    fn builtin_dates_parse() {
        assert!(Catalog::builtin().events().iter().all(|e| e.date().is_some()));
    }

    #[test]
    fn environmental_filter() {
        let ids: Vec<_> = Catalog::builtin()
            .events_in(Some(EventCategory::Environmental))
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["event-4", "event-7"]);
    }
}
