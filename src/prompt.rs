use soilbed::{FoundationKind, SoilType};
use std::io::{self, BufRead, ErrorKind, Write};

/// Foundation depths the prompt accepts, in millimetres.
const DEPTH_RANGE_MM: (f64, f64) = (600.0, 3000.0);
/// Foundation widths the prompt accepts, in millimetres.
const WIDTH_RANGE_MM: (f64, f64) = (300.0, 1500.0);

/// State that outlives a single question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Whether the "press Enter" hint has been printed once already.
    pub intro_shown: bool,
}

/// Asks the questions of the interactive flow and re-asks until the answer is valid.
#[derive(Debug)]
pub struct Prompter<R, W> {
    /// Where answers are read from.
    input: R,
    /// Where questions are written to.
    output: W,
    /// State shared across questions.
    session: Session,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter with a fresh session.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            session: Session::default(),
        }
    }

    /// Print a block of text followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print `question` and read one trimmed line.
    ///
    /// Running out of input is an error so that a closed stdin cannot spin
    /// a re-ask loop forever.
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(answer.trim().to_owned())
    }

    /// Pause until Enter is pressed. The hint is printed only the first time.
    pub fn wait_for_enter(&mut self, message: &str) -> io::Result<()> {
        if self.session.intro_shown {
            self.ask("")?;
        } else {
            self.ask(message)?;
            self.session.intro_shown = true;
        }
        Ok(())
    }

    /// Offer the soil catalog and return the chosen soil.
    pub fn choose_soil_type(&mut self) -> io::Result<SoilType> {
        self.say("What soil type would you prefer to build on?")?;
        for (number, soil) in SoilType::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {} ({})", number + 1, soil.name(), soil.code())?;
        }

        let mut answer = self.ask("Input soil type initial here: ")?;
        loop {
            match answer.parse::<SoilType>() {
                Ok(soil) => return Ok(soil),
                Err(_) => {
                    answer =
                        self.ask("Kindly input valid soil type (LS, MDS, DS, SC, SIC, SS, G): ")?;
                }
            }
        }
    }

    /// Ask for the foundation depth and width, returned in metres.
    pub fn foundation_properties(&mut self) -> io::Result<(f64, f64)> {
        self.say(
            "Now that you have your soil type it's time to determine your foundation properties\n\n\
             Namely your foundation depth (how deep you'll dig)\n\
             and your foundation width (how wide it will be)\n\n\
             Please enter values in mm (typical depth: 600–3000 mm, width: 300–1500 mm)\n",
        )?;
        let depth = self.millimetres("depth", DEPTH_RANGE_MM)?;
        let width = self.millimetres("width", WIDTH_RANGE_MM)?;
        Ok((depth / 1000.0, width / 1000.0))
    }

    /// Ask for one dimension in millimetres until it falls in `range`.
    fn millimetres(&mut self, name: &str, (min, max): (f64, f64)) -> io::Result<f64> {
        loop {
            let answer = self.ask(&format!("What is your foundation {name} in mm? "))?;
            match answer.parse::<f64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => self.say(&format!("Please enter a {name} between {min} mm and {max} mm."))?,
                Err(_) => self.say("That is not a valid number")?,
            }
        }
    }

    /// Ask for the floor count and building area.
    ///
    /// An empty area answer falls back to `default_area`.
    pub fn building_details(
        &mut self,
        max_floors: u32,
        floor_load: f64,
        default_area: f64,
    ) -> io::Result<(u32, f64)> {
        self.say(&format!(
            "It's finally time for you to build your house\n\
             Each floor of your building is assumed to carry a load of {floor_load} kN/m²\n\
             And hey I know you are rich but your building is limited to {max_floors} floors here\n"
        ))?;

        let mut answer = self.ask("So how many floors does your dream house have? ")?;
        let floors = loop {
            match answer.parse::<u32>() {
                Ok(floors) if (1..=max_floors).contains(&floors) => break floors,
                _ => {
                    self.say("That is not a valid number")?;
                    answer = self.ask("Enter a valid number: ")?;
                }
            }
        };

        let mut answer = self.ask(&format!(
            "Enter the building area in m² or press enter to use {default_area} m²: "
        ))?;
        let area = loop {
            if answer.is_empty() {
                break default_area;
            }
            match answer.parse::<f64>() {
                Ok(area) if area.is_finite() && area > 0.0 => break area,
                _ => {
                    self.say("That is not a valid number")?;
                    answer = self.ask("Enter a valid number: ")?;
                }
            }
        };
        Ok((floors, area))
    }

    /// Explain both foundation types and return the chosen one.
    ///
    /// Soils prone to settlement get a tip recommending a raft.
    pub fn foundation_type(&mut self, soil: SoilType) -> io::Result<FoundationKind> {
        self.say(
            "There are several foundation types\n\
             A geotechnical engineer's choice depends on the building load, the soil type and the environment\n\n\
             Here you can choose between two foundation types, raft and isolated footings\n\n\
             A Raft(R) foundation, much like a boat, is a large connected foundation\n\
             that spreads across the base of the building\n\n\
             Isolated Footings(I) on the other hand consist of several columns\n\
             holding up the building, each with its own footing",
        )?;
        if soil.prone_to_settlement() {
            self.say(
                "\nTip:\n\
                 The soil you selected is prone to settlement.\n\
                 Consider using a raft foundation to reduce the risk of uneven sinking.",
            )?;
        }

        let mut answer = self.ask("\nWhich foundation type will you build on? R or I: ")?;
        loop {
            match answer.parse::<FoundationKind>() {
                Ok(kind) => return Ok(kind),
                Err(_) => {
                    answer = self.ask("Please choose a valid foundation type. Either R or I: ")?;
                }
            }
        }
    }

    /// Ask how many footings an isolated foundation has.
    pub fn footing_count(&mut self) -> io::Result<u32> {
        self.say(
            "For an isolated footing, we need to know how many columns/footings your building has",
        )?;
        let mut answer = self.ask("How many columns/footings? ")?;
        loop {
            match answer.parse::<u32>() {
                Ok(count) if count >= 1 => return Ok(count),
                _ => {
                    self.say("That is not a valid number")?;
                    answer = self.ask("Enter a valid number: ")?;
                }
            }
        }
    }

    /// Ask whether to show the formula walkthrough. Returns `true` when skipped.
    pub fn skip_formula(&mut self) -> io::Result<bool> {
        let answer = self.ask("Press Enter to see the formula used or type s to skip: ")?;
        Ok(answer.eq_ignore_ascii_case("s"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run<T>(
        input: &str,
        ask: impl FnOnce(&mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> io::Result<T>,
    ) -> (io::Result<T>, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = ask(&mut prompter);
        (result, String::from_utf8(prompter.output).expect("prompts are utf-8"))
    }

    #[test]
    fn soil_choice_reasks_until_valid() {
        let (soil, transcript) = run("clay\nsc\n", Prompter::choose_soil_type);
        assert_eq!(soil.expect("soil chosen"), SoilType::SoftClay);
        assert!(transcript.contains("7. Gravel (G)"));
        assert!(transcript.contains("Kindly input valid soil type"));
    }

    #[test]
    fn dimensions_are_range_checked_and_converted() {
        let (dimensions, transcript) =
            run("200\nabc\n1500\n1200\n", Prompter::foundation_properties);
        let (depth, width) = dimensions.expect("dimensions given");
        assert_eq!(depth, 1.5);
        assert_eq!(width, 1.2);
        assert!(transcript.contains("between 600 mm and 3000 mm"));
        assert!(transcript.contains("That is not a valid number"));
    }

    #[test]
    fn empty_area_uses_default() {
        let (details, _) = run("5\n0\n3\n\n", |prompter| {
            prompter.building_details(4, 6.0, 100.0)
        });
        assert_eq!(details.expect("details given"), (3, 100.0));
    }

    #[test]
    fn explicit_area_is_used() {
        let (details, _) = run("1\n-4\n250\n", |prompter| {
            prompter.building_details(4, 6.0, 100.0)
        });
        assert_eq!(details.expect("details given"), (1, 250.0));
    }

    #[test]
    fn infinite_area_is_rejected() {
        let (details, transcript) = run("2\ninf\n1e400\n80\n", |prompter| {
            prompter.building_details(4, 6.0, 100.0)
        });
        assert_eq!(details.expect("details given"), (2, 80.0));
        assert_eq!(transcript.matches("That is not a valid number").count(), 2);
    }

    #[test]
    fn settlement_tip_only_for_prone_soils() {
        let (kind, transcript) = run("x\ni\n", |prompter| {
            prompter.foundation_type(SoilType::LooseSand)
        });
        assert_eq!(kind.expect("kind chosen"), FoundationKind::Isolated);
        assert!(transcript.contains("prone to settlement"));

        let (_, transcript) = run("r\n", |prompter| prompter.foundation_type(SoilType::Gravel));
        assert!(!transcript.contains("prone to settlement"));
    }

    #[test]
    fn footing_count_rejects_zero() {
        let (count, _) = run("0\n4\n", Prompter::footing_count);
        assert_eq!(count.expect("count given"), 4);
    }

    #[test]
    fn enter_hint_is_shown_once() {
        let (session, transcript) = run("\n\n", |prompter| {
            prompter.wait_for_enter("Press Enter to continue...")?;
            prompter.wait_for_enter("Press Enter to continue...")?;
            Ok(prompter.session)
        });
        assert!(session.expect("both lines read").intro_shown);
        assert_eq!(transcript.matches("Press Enter").count(), 1);
    }

    #[test]
    fn formula_can_be_skipped() {
        let (skipped, _) = run("S\n", Prompter::skip_formula);
        assert!(skipped.expect("answer read"));
        let (skipped, _) = run("\n", Prompter::skip_formula);
        assert!(!skipped.expect("answer read"));
    }

    #[test]
    fn closed_input_stops_reasking() {
        let (soil, _) = run("mud\n", Prompter::choose_soil_type);
        let error = soil.expect_err("input ran out");
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }
}
