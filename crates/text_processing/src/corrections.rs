//! Correction rules for common STT misrecognitions
//!
//! The transcription layer routinely mishears domain vocabulary: "booking"
//! becomes "bouquet", "Tamara Coorg" becomes "tamara cork", Indian names
//! come out as unrelated English words. Each rule rewrites one such
//! confusion. Rules whose trigger word is also a legitimate English word
//! ("limit", "weekend", "state") carry a context pattern and only fire when
//! the surrounding text shows the domain context the misheard word needs.
//!
//! Rules apply in declaration order over the whole utterance; replacements
//! may reference capture groups ("INR $1").

use once_cell::sync::Lazy;
use regex::Regex;

/// One STT repair: rewrite `pattern` to `replacement`, gated on `context`
/// matching anywhere in the text when present.
#[derive(Clone)]
pub struct CorrectionRule {
    pub pattern: Regex,
    pub replacement: &'static str,
    pub context: Option<Regex>,
}

impl CorrectionRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){pattern}")).expect("correction pattern"),
            replacement,
            context: None,
        }
    }

    fn with_context(pattern: &str, replacement: &'static str, context: &str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){pattern}")).expect("correction pattern"),
            replacement,
            context: Some(Regex::new(&format!("(?i){context}")).expect("context pattern")),
        }
    }
}

/// Default rule table, most specific first within each group
pub static CORRECTION_RULES: Lazy<Vec<CorrectionRule>> = Lazy::new(|| {
    vec![
        // Booking vocabulary
        CorrectionRule::new(r"\bbouquet\s*numbers?\b", "booking number"),
        CorrectionRule::new(r"\bbucket\s*numbers?\b", "booking number"),
        CorrectionRule::new(r"\bbooking\s*numbers\b", "booking number"),
        CorrectionRule::new(r"\bbook\s+king\b", "booking"),
        CorrectionRule::new(r"\bbuff[ei]ng?\s*number\b", "booking number"),
        // Resort names
        CorrectionRule::new(r"\btamara\s*c(?:ourt|ork|ore|orps?|ord|hord)\b", "Tamara Coorg"),
        CorrectionRule::new(r"\btamar[io]?\s*(?:cord|gord|korg|corgan)\b", "Tamara Coorg"),
        CorrectionRule::new(
            r"\bthe\s*(?:temar|tamer|tamar|tim\s*[ar]+|temmer|timmer)\s*(?:resorts?|resource?s?|reserve?s?|rover\s*2?)?\b",
            "The Tamara Resorts",
        ),
        CorrectionRule::new(
            r"\b(?:temar|tamer|tamar|temmer|timmer)\s*(?:resorts?|resource?s?|reserve?s?|revour)\b",
            "Tamara Resorts",
        ),
        CorrectionRule::new(r"\btamara\s*(?:kodiak?|koda|kodi|kode)\b", "Tamara Kodaikanal"),
        CorrectionRule::new(r"\btemara\s*kode\b", "Tamara Kodaikanal"),
        CorrectionRule::new(r"\btemara(?:de)?\b", "Tamara"),
        CorrectionRule::new(r"\bthe\s+tomorrow\b", "The Tamara"),
        CorrectionRule::new(r"\btmr\s*(?:results?|resorts?)\b", "Tamara Resorts"),
        CorrectionRule::new(r"\btim\s*r\s*resorts?\b", "Tamara Resorts"),
        CorrectionRule::new(r"\b10\s*(?:more|hour|our)\s*resorts?\b", "Tamara Resorts"),
        CorrectionRule::new(r"\btamer\s*verse\b", "Tamara Resorts"),
        CorrectionRule::new(r"\btamar\s*research\b", "Tamara Resorts"),
        // Names the STT layer mangles
        CorrectionRule::new(r"\bsyndrome\b", "Sundaram"),
        CorrectionRule::new(r"\bsunder(?:ram|ham)\b", "Sundaram"),
        CorrectionRule::new(r"\bminachi\s*(?:suram|sunderram)?\b", "Meenakshi Sundaram"),
        CorrectionRule::new(r"\bmina\b", "Meena"),
        CorrectionRule::new(r"\b(?:emmet|emmett|emman|emmit)\b", "Amit"),
        CorrectionRule::with_context(r"\blimit\b", "Amit", r"phone|number|mobile"),
        CorrectionRule::with_context(r"\bamy\b", "Amit", r"tamara|coorg|booking"),
        CorrectionRule::new(r"\b(?:benjat|benja)\b", "Venkat"),
        CorrectionRule::new(r"\bband\s*cap\b", "Venkat"),
        CorrectionRule::new(r"\bvinked\b", "Venkat"),
        CorrectionRule::new(r"\bvincan\b", "Venkat"),
        CorrectionRule::new(r"\bben\s*cat\b", "Venkat"),
        CorrectionRule::new(r"\bpama\b", "Padma"),
        CorrectionRule::with_context(r"\bhannah?\b", "Padma", r"tamara|booking|cottage"),
        CorrectionRule::new(r"\bketha\b", "Kavitha"),
        CorrectionRule::new(r"\bdivy\b", "Divya"),
        CorrectionRule::new(r"\bdivia\b", "Divya"),
        CorrectionRule::with_context(r"\bdeviation\b", "Divya", r"name|shankar"),
        CorrectionRule::with_context(r"\bdivision\b", "Divya", r"name|shankar|car"),
        CorrectionRule::with_context(r"\bnina\b", "Meena", r"tamara|coorg|booking"),
        CorrectionRule::new(r"\bsandy\b", "Sandeep"),
        CorrectionRule::new(r"\bsend\s*deep\b", "Sandeep"),
        CorrectionRule::with_context(
            r"\b(?:milan|neiland?|nel[ae]m?|nelm|nela|neil?a?m?p?)\b",
            "Neelam",
            r"tamara|kodai|booking|cottage|phone",
        ),
        CorrectionRule::new(r"\bnew\s*lamp\b", "Neelam"),
        CorrectionRule::new(r"\baaron\b", "Arun"),
        CorrectionRule::new(r"\barum\b", "Arun"),
        CorrectionRule::with_context(r"\banna\b", "Anil", r"phone|number|correct"),
        CorrectionRule::new(r"\btan\s*bi\b", "Tanvi"),
        CorrectionRule::new(r"\bten\s*b(?:eat|i)?\b", "Tanvi"),
        CorrectionRule::with_context(r"\bcandy\b", "Tanvi", r"cottage|booking|stay"),
        CorrectionRule::with_context(r"\bcan\s*be\b", "Tanvi", r"email|cottage|booking"),
        CorrectionRule::new(r"\btamby\b", "Tanvi"),
        CorrectionRule::new(r"\bvickhamp?\b", "Vikram"),
        CorrectionRule::new(r"\bvicram\b", "Vikram"),
        CorrectionRule::with_context(r"\bweekend\b", "Vikram", r"phone|number|correct"),
        CorrectionRule::new(r"\bthresh\b", "Suresh"),
        CorrectionRule::new(r"\bseresh\b", "Suresh"),
        CorrectionRule::new(r"\b(?:harsh|harish)\b", "Harish"),
        CorrectionRule::with_context(r"\badded\b", "Aditya", r"phone|email|booking"),
        CorrectionRule::with_context(r"\bshri\b", "Shreya", r"tamara|booking|cottage"),
        CorrectionRule::with_context(r"\bsith\b", "Siddharth", r"name|das"),
        CorrectionRule::new(r"\bsiddharth\s+dust\b", "Siddharth Das"),
        CorrectionRule::new(r"\bdebe\b", "Deepa"),
        CorrectionRule::new(r"\bkarto\b", "Karthik"),
        CorrectionRule::with_context(r"\bsweaty\b", "Swati", r"apologies|reservation"),
        CorrectionRule::new(r"\bswatty\b", "Swati"),
        // General word confusions
        CorrectionRule::new(r"\binfirm\b", "confirm"),
        CorrectionRule::new(r"\bd(?:ige|ive|odge)\s*(?:you)?\s*better\b", "guide you better"),
        CorrectionRule::new(r"\bbuy\s+you\s+better\b", "guide you better"),
        CorrectionRule::new(r"\btell\s+you\s+better\b", "guide you better"),
        CorrectionRule::new(
            r"\b(?:yeah|ya|yah),?\s+i\s+know\s+your\s+name\b",
            "May I know your name",
        ),
        CorrectionRule::new(
            r"\bi\s+know\s+your\s+name\s*,?\s*please\b",
            "May I know your name, please",
        ),
        CorrectionRule::new(r"\btheble\b", "unable"),
        CorrectionRule::new(r"\bincaparing\b", "encountering"),
        CorrectionRule::new(r"\bencom+er+ing\b", "encountering"),
        CorrectionRule::new(r"\bintervenience\b", "inconvenience"),
        CorrectionRule::new(r"\bstill\s+in\s+cannot\s+issue\b", "still encountering an issue"),
        CorrectionRule::new(r"\bstill\s+cannot\s+issue\b", "still encountering an issue"),
        CorrectionRule::with_context(r"\bperceive\b", "proceed with", r"booking"),
        CorrectionRule::with_context(
            r"\bstate\b",
            "stay",
            r"nights?|luxury|cottage|booking|restful",
        ),
        CorrectionRule::new(r"\b(?:it|git)\s*away\b", "getaway"),
        CorrectionRule::new(r"\bgetit\s*away\b", "getaway"),
        CorrectionRule::with_context(r"\bItaly\b", "getaway", r"restful|hoping"),
        CorrectionRule::with_context(r"\bcounting\b", "encountering", r"technical|phone"),
        CorrectionRule::new(r"\bfix\s+up\b", "hiccup"),
        CorrectionRule::new(r"\bsick\s+up\b", "hiccup"),
        CorrectionRule::new(r"\b(?:how\s+)?many\s+(?:I\s+)?assist\s+you\b", "may I assist you"),
        // Room and accommodation terms
        CorrectionRule::new(r"\bluxury\s*(?:sweet|sweat)\b", "luxury suite"),
        CorrectionRule::new(r"\bluc?r?atory\s*cottage\b", "luxury cottage"),
        CorrectionRule::new(r"\bletter\s*cottage\b", "luxury cottage"),
        CorrectionRule::new(r"\blucky\s*cottages?\b", "luxury cottages"),
        CorrectionRule::new(r"\btrainful\b", "tranquil"),
        CorrectionRule::new(r"\brestortive\b", "restorative"),
        CorrectionRule::new(r"\barrestful\b", "a restful"),
        CorrectionRule::with_context(r"\bresponsive\b", "restful", r"nature|getaway|stay"),
        CorrectionRule::with_context(r"\bserena\b", "serene", r"atmosphere|peaceful|tranquil"),
        CorrectionRule::new(r"\bwelcher\s+friendly\b", "wheelchair friendly"),
        CorrectionRule::new(r"\bwhirl\s+friendly\b", "wheelchair friendly"),
        // Activities and experiences
        CorrectionRule::new(r"\ball\s+males\b", "all meals"),
        CorrectionRule::new(
            r"\b(?:curious|period|charity|charitated)\s+activities\b",
            "curated activities",
        ),
        CorrectionRule::new(r"\bAmerican\s+plan\b", "meal plan"),
        CorrectionRule::new(r"\b180\s*a\s*go\b", "180 acres"),
        CorrectionRule::with_context(r"\bmiss\b", "mist", r"tree|house|floating|cottage|plantation"),
        CorrectionRule::with_context(r"\bnest\b", "mist", r"tree|house|floating|plantation|coffee"),
        CorrectionRule::new(r"\bneed\s+your\s+focused\b", "nature-focused"),
        CorrectionRule::new(r"\bnature\s+your\s+focused\b", "nature-focused"),
        CorrectionRule::new(r"\bfall\s+meals\b", "all meals"),
        CorrectionRule::new(r"\bhumanities\b", "amenities"),
        CorrectionRule::new(r"\bhumidities\b", "amenities"),
        CorrectionRule::with_context(r"\bonline\b", "unwind", r"relax|unwind|reflection"),
        CorrectionRule::with_context(r"\bdesk\b", "guests", r"traveling|guests?"),
        CorrectionRule::with_context(r"\bguts\b", "guests", r"traveling"),
        CorrectionRule::with_context(r"\bdeath\b", "guests", r"traveling|cottage|looking|train"),
        // Currency and pricing
        CorrectionRule::new(r"\bcomes?\s+dry\s+and\s+are\b", "comes to INR"),
        CorrectionRule::new(r"\brnr\b", "INR"),
        CorrectionRule::new(r"\bkodal\b", "total"),
        CorrectionRule::new(r"\binr\s+(\d)", "INR $1"),
        CorrectionRule::new(r"\bi\s*n\s*r\b", "INR"),
        // Spelling cleanup
        CorrectionRule::new(r"\bwonderfull\b", "wonderful"),
        CorrectionRule::new(r"\bbeautifull\b", "beautiful"),
        CorrectionRule::new(r"\bdelightfull\b", "delightful"),
        CorrectionRule::new(r"\bcottedge\b", "cottage"),
        CorrectionRule::new(r"\bcotage\b", "cottage"),
        CorrectionRule::new(r"\bsincerly\b", "sincerely"),
        CorrectionRule::new(r"\bserious\s+apologies\b", "sincere apologies"),
        CorrectionRule::new(r"\bconfirmationed?\b", "confirmed"),
        CorrectionRule::new(r"\breservated\b", "reserved"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_compile() {
        assert!(!CORRECTION_RULES.is_empty());
    }

    #[test]
    fn test_contextual_rules_carry_context() {
        let limit_rule = CORRECTION_RULES
            .iter()
            .find(|r| r.replacement == "Amit" && r.pattern.as_str().contains("limit"))
            .unwrap();
        assert!(limit_rule.context.is_some());
    }
}
