/// A fixed utterance and the reprompt spoken if the user stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script {
    pub speech: &'static str,
    pub reprompt: &'static str,
}

const FOLLOW_UP: &str = "What else would you like to know?";
const OPENING_QUESTION: &str = "What do you want to ask?";

pub const LAUNCH: Script = Script {
    speech: "Hey there! I am your home insurance agent. Ask me any questions that you have about a home insurance policy.",
    reprompt: OPENING_QUESTION,
};

pub const ORNAMENT: Script = Script {
    speech: "You can cover your valuable items like silver or golden ornaments in home insurance, but your premium and policy amount will change accordingly.",
    reprompt: FOLLOW_UP,
};

pub const SCHEDULE_LOSS: Script = Script {
    speech: "Schedule of loss is a document submitted to the insurance company to claim the policy; it gives the information of damaged or lost items like model number, when it was purchased, cost of the item etc.",
    reprompt: FOLLOW_UP,
};

pub const PERILS: Script = Script {
    speech: "In home insurance coverage, ‘All perils’ protects you from the widest range of risks besides common risks while ‘Specified perils’ will give coverage only for the common risks, that is listed in your policy.",
    reprompt: FOLLOW_UP,
};

pub const HELP: Script = Script {
    speech: "This is the help intent.",
    reprompt: "This is the help intent.",
};

pub const FALLBACK: Script = Script {
    speech: "This is the fallback intent.",
    reprompt: "This is the fallback intent.",
};

pub const NOTHING_TO_REPEAT: Script = Script {
    speech: "I haven't said anything yet. Ask me a question about home insurance.",
    reprompt: OPENING_QUESTION,
};

pub const APOLOGY: Script = Script {
    speech: "Sorry, I had trouble doing what you asked. Please try again.",
    reprompt: "Sorry, I had trouble doing what you asked. Please try again.",
};

pub const GOODBYE: &str = "Goodbye.";
