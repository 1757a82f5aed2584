//! Static knowledge table for the support chatbot.
//!
//! Three disjoint buckets: `common` applies to everyone and is always
//! scanned first; `agent` and `client` are role-specific. Table order is
//! significant — the responder returns the first entry whose keyword occurs
//! in the (lowercased) message, so broader entries belong later.

/// One keyword-matched canned reply. Keywords are lowercase; matching is
/// plain substring containment against the lowercased message.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeEntry {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl KnowledgeEntry {
    /// Whether any keyword occurs in the (already lowercased) message.
    pub fn matches(&self, lowered_message: &str) -> bool {
        self.keywords.iter().any(|kw| lowered_message.contains(kw))
    }
}

/// The full rule table, bucketed by audience.
pub struct KnowledgeBase {
    pub common: Vec<KnowledgeEntry>,
    pub agent: Vec<KnowledgeEntry>,
    pub client: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build the default rule table.
    pub fn default_rules() -> Self {
        let common = vec![
            KnowledgeEntry {
                keywords: &["hello", "hi", "hey", "namaste"],
                response: "Hello! Welcome to the registration desk.\nAsk me about **company registration**, **GST**, **trademarks**, or your **application status**.",
            },
            KnowledgeEntry {
                keywords: &["thank", "thanks"],
                response: "You're welcome! Happy to help with anything else.",
            },
            KnowledgeEntry {
                keywords: &["contact", "support", "helpline", "call you"],
                response: "**Support**\nEmail: support@example.in\nHelpline: 1800-000-000 (Mon-Sat, 10am-7pm IST)",
            },
            KnowledgeEntry {
                keywords: &["services", "what do you offer", "what can you do"],
                response: "We handle end-to-end business registrations:\n**Private Limited** and **Public Limited** incorporation\n**LLP** registration\n**Sole Proprietorship** setup\nPlus **GST** registration and **trademark** filing.",
            },
            KnowledgeEntry {
                keywords: &["how long", "timeline", "turnaround", "days"],
                response: "Typical turnaround once documents are in:\n**Proprietorship**: 3-5 working days\n**LLP / Private Limited**: 10-15 working days\n**Trademark**: filing in 3 days, registry decision takes longer.",
            },
            KnowledgeEntry {
                keywords: &["price", "cost", "fees", "charges"],
                response: "Pricing depends on the service and plan (**Basic**, **Standard**, **Premium**).\nOpen the service page for the exact fee break-up including government charges.",
            },
        ];

        let client = vec![
            KnowledgeEntry {
                keywords: &["gst", "gstin", "goods and services tax"],
                response: "**GST Registration**\nMandatory once turnover crosses Rs. 40 lakh (Rs. 20 lakh for services).\nYou'll need PAN, Aadhaar, a business address proof and a bank statement.\nWe file and track the GSTIN for you.",
            },
            KnowledgeEntry {
                keywords: &["private limited", "pvt ltd", "incorporat", "company registration"],
                response: "**Private Limited Company**\nNeeds 2-5 directors and a registered office in India.\nStart the wizard from your dashboard; it walks you through details, directors, documents, review and payment.",
            },
            KnowledgeEntry {
                keywords: &["llp", "limited liability partnership", "designated partner"],
                response: "**LLP Registration**\nNeeds at least 2 partners, of whom at least 2 are **designated partners**.\nProfit-sharing ratios across partners must add up to 100%.",
            },
            KnowledgeEntry {
                keywords: &["proprietor", "sole trader", "own name"],
                response: "**Sole Proprietorship**\nThe simplest structure: one owner, minimal compliance.\nYou'll need the proprietor's PAN, Aadhaar and a business address proof.",
            },
            KnowledgeEntry {
                keywords: &["trademark", "brand name", "logo"],
                response: "**Trademark Filing**\nProtects your brand name or logo.\nWe run a conflict search, prepare the application and file it with the registry.",
            },
            KnowledgeEntry {
                keywords: &["kyc", "verification", "verify my"],
                response: "**KYC**\nYour KYC status shows on your profile page.\nIf it's pending, upload a government ID and wait for review; submissions are checked within 2 working days.",
            },
            KnowledgeEntry {
                keywords: &["payment", "refund", "invoice", "paid"],
                response: "**Payments**\nInvoices appear on your dashboard after each successful payment.\nFor refunds, write to support@example.in with your submission ID.",
            },
            KnowledgeEntry {
                keywords: &["status", "track", "application", "progress"],
                response: "You can track every application from the **My Registrations** section of your dashboard.\nEach submission ID shows its current stage and pending actions.",
            },
            KnowledgeEntry {
                keywords: &["document", "upload", "required papers"],
                response: "**Documents**\nEvery partner or director needs: PAN card, Aadhaar card, a photo and an address proof.\nThe company itself needs a registered-office address proof.\nUpload them in step 3 of the wizard.",
            },
        ];

        let agent = vec![
            KnowledgeEntry {
                keywords: &["withdraw", "payout", "transfer my earnings"],
                response: "**Withdrawals**\nGo to **Earnings → Withdraw** and pick a verified bank account.\nPayouts are processed every Tuesday and Friday; minimum withdrawal is Rs. 500.",
            },
            KnowledgeEntry {
                keywords: &["commission", "earning", "incentive"],
                response: "**Commissions**\nYou earn a percentage on every completed registration you bring in.\nThe current slab is on the **Earnings** page; incentives reset monthly.",
            },
            KnowledgeEntry {
                keywords: &["lead", "assigned", "new client"],
                response: "**Leads**\nNew leads land in your **Assigned Clients** list with a 24-hour first-contact window.\nMark each lead's outcome so it doesn't get reassigned.",
            },
            KnowledgeEntry {
                keywords: &["onboard", "add a client", "register a client"],
                response: "To file on a client's behalf, open their profile and start the wizard from there.\nThe submission is recorded under the client's account with you as the referring agent.",
            },
        ];

        Self {
            common,
            agent,
            client,
        }
    }
}
