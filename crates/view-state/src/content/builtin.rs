//! Embedded STARS Erasmus+ content.
//!
//! Kept as a `&'static str` so the dataset is bundled inside the binary
//! without filesystem lookups; it is parsed through the same path as content
//! files passed on the command line.

pub const STARS_CONTENT_JSON: &str = r##"
{
  "partners": [
    {
      "region": "Europe",
      "institutions": [
        {
          "name": "University of Lisbon (UL)",
          "location": "Lisbon, Portugal",
          "role": "Project Coordinator",
          "description": "It is the largest and most prestigious university in Portugal. Heir to an academic tradition spanning over seven centuries, it provides its entire community with the best and most diverse academic programs.",
          "url": "https://www.ulisboa.pt/en"
        },
        {
          "name": "Lund University (LU)",
          "location": "Lund, Sweden",
          "role": "Partner",
          "description": "Frontrunner in how the “geographic approach” is centrally embedded in world-leading research and education across all disciplines at the university.",
          "url": "https://www.lunduniversity.lu.se/home"
        }
      ]
    },
    {
      "region": "Latin America",
      "institutions": [
        {
          "name": "Escuela Superior Politécnica del Litoral (ESPOL)",
          "location": "Guayaquil, Ecuador",
          "role": "Partner",
          "description": "It is the largest partner in the country and regional coordinator. Founded in 1958, it is the leader public higher education university in Ecuador.",
          "url": "https://www.espol.edu.ec/en"
        },
        {
          "name": "Universidad Técnica del Norte (UTN)",
          "location": "Imbabura, Ecuador",
          "role": "Partner",
          "description": "It is a public institution dedicated to providing quality education, fostering research, and promoting sustainable development.",
          "url": "https://www.utn.edu.ec/"
        },
        {
          "name": "Universidad Industrial de Santander (UIS)",
          "location": "Bucaramanga, Colombia",
          "role": "Partner",
          "description": "It is a public university, based on a coeducational and research model. Since its foundation had developed innovative research in engineering, basic sciences, and medicine.",
          "url": "https://uis.edu.co/en/"
        },
        {
          "name": "Universidad Pedagógica y Tecnológica de Colombia (UPTC)",
          "location": "Tunja, Colombia",
          "role": "Partner",
          "description": "It is an autonomous, national, public university. It has six outreach program headquarters and 24 regional distance education centers, allowing it to operate in several departments nationwide.",
          "url": "https://www.uptc.edu.co/sitio/portal/front/index.html#"
        }
      ]
    }
  ],
  "coordinates": {
    "University of Lisbon (UL)": [38.7223, -9.1393],
    "Lund University (LU)": [55.7047, 13.1910],
    "Escuela Superior Politécnica del Litoral (ESPOL)": [-2.1444, -79.9657],
    "Universidad Técnica del Norte (UTN)": [0.3514, -78.1128],
    "Universidad Industrial de Santander (UIS)": [7.1408, -73.1207],
    "Universidad Pedagógica y Tecnológica de Colombia (UPTC)": [5.5492, -73.3562]
  },
  "faqs": [
    {
      "question": "What is the STARS project",
      "answer": "STARS is an international higher education capacity-building project focused on improving how sudden natural hazards—such as earthquakes, floods, and landslides—are assessed and managed using advanced geospatial technologies, including GIS, BIM, and Geospatial Artificial Intelligence."
    },
    {
      "question": "What is the main goal of STARS?",
      "answer": "The project aims to strengthen knowledge and skills in advanced geospatial technologies for data-driven natural hazard management, while building capacity in Higher Education Institutions in Ecuador and Colombia through innovative training focused on cutting-edge tools for sudden hazard risk assessment."
    },
    {
      "question": "Why is this project important?",
      "answer": "Latin America and the Caribbean are among the most disaster-prone regions globally, with millions affected by sudden natural hazards. STARS helps address this challenge by strengthening institutional capacity, improving educational programs, and preparing professionals to better prevent, assess, and manage disaster risks using modern technologies."
    },
    {
      "question": "Which natural hazards does STARS focus on?",
      "answer": "The project focuses primarily on earthquakes, floods, and landslides, which are among the most impactful and recurrent natural hazards affecting equatorial regions such as Ecuador and Colombia."
    },
    {
      "question": "What technologies are used in STARS?",
      "answer": "STARS integrates Geographic Information Systems (GIS), Building Information Modelling (BIM), and Geospatial Artificial Intelligence (GeoAI) to support risk assessment, disaster preparedness, mitigation planning, and the development of resilient infrastructure."
    },
    {
      "question": "Who can participate in the training programs?",
      "answer": "The programs are primarily designed for faculty members, researchers, and graduate students at partner universities. However, specific workshops may be open to external professionals in disaster risk management agencies."
    },
    {
      "question": "Which institutions are involved?",
      "answer": "The consortium includes European partners: University of Lisbon (Portugal) and Lund University (Sweden); and South American partners: ESPOL and UTN (Ecuador), UIS and UPTC (Colombia)."
    },
    {
      "question": "How is the project funded?",
      "answer": "STARS is funded under the Erasmus+ Capacity Building in Higher Education (CBHE) programme of the European Union."
    },
    {
      "question": "When does the project end?",
      "answer": "The project is a 3-year initiative, scheduled to conclude in late 2028. Sustainability plans are in place to ensure the curriculum continues after funding ends."
    }
  ],
  "news": [
    {
      "title": "Workshop in Quito: Digital Mapping Basics",
      "date": "2025-10-15",
      "category": "Workshop",
      "description": "Faculty members gathered to learn the latest digital mapping techniques for curriculum integration.",
      "image_ref": "https://picsum.photos/seed/stars1/600/400.jpg"
    },
    {
      "title": "New Equipment Arrival at Partner Universities",
      "date": "2025-09-02",
      "category": "Infrastructure",
      "description": "High-precision drones and workstations have been delivered to our partners in Colombia.",
      "image_ref": "https://picsum.photos/seed/stars2/600/400.jpg"
    },
    {
      "title": "Student Exchange Program Open for Applications",
      "date": "2025-08-20",
      "category": "Mobility",
      "description": "Students can now apply for the upcoming semester exchange focused on risk assessment.",
      "image_ref": "https://picsum.photos/seed/stars3/600/400.jpg"
    }
  ]
}
"##;
